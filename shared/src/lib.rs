//! Shared utilities and common types for the VeriCode server
//!
//! This crate provides common functionality used across the server crates:
//! - Configuration types
//! - Utility functions (email normalization, log masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::cache::CacheConfig;
pub use utils::email;
