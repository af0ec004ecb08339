//! Cache module for the Redis-backed code store
//!
//! Provides the async Redis client with retry logic and the
//! `RedisCodeStore` adapter implementing the core store contract.

pub mod code_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use code_store::RedisCodeStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use vc_shared::config::cache::CacheConfig;
