//! Configuration types shared across server crates

pub mod cache;

pub use cache::CacheConfig;
