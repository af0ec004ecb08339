//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the VeriCode
//! verification service. It provides the Redis-backed implementation of
//! the expiring code store that `vc_core` defines the contract for.
//!
//! The core crate never talks to Redis directly; it sees only the
//! `CodeStore` trait. This crate supplies [`cache::RedisCodeStore`] as the
//! production implementation.

// Re-export core error types for convenience
pub use vc_core::errors::*;

/// Cache module - Redis client and the expiring code store
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
