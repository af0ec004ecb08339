//! Domain-specific error types for the verification lifecycle
//!
//! The taxonomy is deliberately small. `InvalidOrExpired` unifies absent,
//! mismatched, and expired codes into one undifferentiated outcome: the
//! caller must never learn which case applied. `StoreUnavailable` marks a
//! transient infrastructure failure and is the only retryable condition.

use thiserror::Error;

/// Errors from issuing a verification code
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IssueError {
    #[error("Verification store unavailable")]
    StoreUnavailable,
}

/// Errors from validating a submitted code
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidateError {
    /// Absent key, mismatched value, or expired code. Not retryable with
    /// the same candidate.
    #[error("Invalid or expired verification code")]
    InvalidOrExpired,

    /// The store could not be reached. Retryable; never conflated with an
    /// invalid code.
    #[error("Verification store unavailable")]
    StoreUnavailable,
}

/// Errors surfaced by an expiring code store implementation
///
/// A miss (absent key or mismatched value) is not an error; store
/// implementations report it through their return value. The only failure
/// mode a store may raise is unavailability of the backing service.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Code store unavailable: {message}")]
    Unavailable { message: String },
}
