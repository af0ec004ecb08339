//! Verification service module for email confirmation
//!
//! This module provides the verification-code lifecycle:
//! - Code generation (uniform 6-digit codes from the OS CSPRNG)
//! - Time-bounded storage through the expiring store contract
//! - Atomic single-use validation

mod config;
mod generator;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use generator::generate_code;
pub use service::VerificationService;
pub use traits::CodeStore;
