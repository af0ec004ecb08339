//! # VeriCode Core
//!
//! Core business logic and domain layer for the VeriCode backend.
//! This crate contains the verification-code domain model, the expiring
//! store contract, the code generator, and the verification service that
//! owns the issue/validate lifecycle.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use errors::*;
pub use services::*;
