//! Main verification service implementation

use std::sync::Arc;

use vc_shared::utils::email;

use crate::domain::verification_code::is_well_formed;
use crate::errors::{IssueError, StoreError, ValidateError};

use super::config::VerificationConfig;
use super::generator::generate_code;
use super::traits::CodeStore;

/// Verification service owning the issue/validate lifecycle.
///
/// Stateless across calls: every piece of mutable state lives in the
/// store, so the service needs no internal locking and may be called
/// concurrently from any number of request-handling tasks. Both
/// operations perform network I/O against the store and may suspend
/// accordingly.
pub struct VerificationService<S: CodeStore> {
    /// Expiring store holding the one live code per email
    store: Arc<S>,
    /// Service configuration
    config: VerificationConfig,
}

impl<S: CodeStore> Clone for VerificationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: CodeStore> VerificationService<S> {
    /// Create a new verification service
    pub fn new(store: Arc<S>, config: VerificationConfig) -> Self {
        Self { store, config }
    }

    /// Issue a fresh verification code for an email address.
    ///
    /// Generates a code and stores it under the normalized address with
    /// the configured validity window. Issuing unconditionally replaces
    /// any pending code for the same address and resets its window. The
    /// code is disclosed only through the return value; dispatching it to
    /// a delivery channel is the caller's responsibility.
    pub async fn issue_code(&self, email: &str) -> Result<String, IssueError> {
        let key = email::normalize(email);
        let code = generate_code();

        self.store
            .set_with_ttl(&key, &code, self.config.code_ttl_seconds)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %email::mask(email),
                    error = %e,
                    event = "code_issue_failed",
                    "Failed to store verification code"
                );
                IssueError::StoreUnavailable
            })?;

        tracing::info!(
            email = %email::mask(email),
            ttl_seconds = self.config.code_ttl_seconds,
            event = "code_issued",
            "Issued verification code"
        );

        Ok(code)
    }

    /// Validate a submitted code for an email address.
    ///
    /// Performs one atomic compare-and-delete against the store: on a
    /// match the code is consumed and permanently invalid. Absent,
    /// expired, and mismatched codes all map to the same
    /// [`ValidateError::InvalidOrExpired`] outcome; only store
    /// unavailability is reported distinctly, since only that case is
    /// worth retrying with the same candidate.
    pub async fn validate_code(&self, email: &str, candidate: &str) -> Result<(), ValidateError> {
        // A malformed candidate can never match a stored code; skip the
        // store round trip.
        if !is_well_formed(candidate) {
            tracing::warn!(
                email = %email::mask(email),
                candidate_length = candidate.len(),
                event = "code_rejected",
                "Malformed verification code candidate"
            );
            return Err(ValidateError::InvalidOrExpired);
        }

        let key = email::normalize(email);

        match self.store.compare_and_delete(&key, candidate).await {
            Ok(true) => {
                tracing::info!(
                    email = %email::mask(email),
                    event = "code_validated",
                    "Verification code validated and consumed"
                );
                Ok(())
            }
            Ok(false) => {
                tracing::warn!(
                    email = %email::mask(email),
                    event = "code_rejected",
                    "Invalid or expired verification code"
                );
                Err(ValidateError::InvalidOrExpired)
            }
            Err(StoreError::Unavailable { message }) => {
                tracing::error!(
                    email = %email::mask(email),
                    error = %message,
                    event = "code_validation_unavailable",
                    "Verification store unreachable during validation"
                );
                Err(ValidateError::StoreUnavailable)
            }
        }
    }
}
