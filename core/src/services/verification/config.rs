//! Configuration for the verification service

use crate::domain::verification_code::CODE_TTL_SECONDS;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Number of seconds an issued code stays valid
    pub code_ttl_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: CODE_TTL_SECONDS,
        }
    }
}
