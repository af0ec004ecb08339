//! Email address helpers
//!
//! Normalization is part of the store key contract: every store interaction
//! is keyed on the case-folded address, so case variation in caller input
//! can never produce a second live code for the same logical address.

/// Normalize an email address for use as a store key (case-folded).
pub fn normalize(email: &str) -> String {
    email.to_lowercase()
}

/// Mask an email address for logging (show first character of the local
/// part and the domain only).
///
/// Implements the security requirement to desensitize addresses in logs.
pub fn mask(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let head: String = local.chars().take(1).collect();
            format!("{}***@{}", head, domain)
        }
        None => "***".to_string(),
    }
}
