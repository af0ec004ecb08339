//! Verification code format
//!
//! A code is a fixed-width 6-digit decimal string in [100000, 999999].
//! The first digit is never zero, so the width is carried by the value
//! itself and no padding is involved. A code lives in the store as a
//! single entry keyed by the normalized email address; there is no code
//! entity at rest beyond that entry.

/// Number of digits in a verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest issuable code value
pub const CODE_MIN: u32 = 100_000;

/// Largest issuable code value
pub const CODE_MAX: u32 = 999_999;

/// Validity window for an issued code, in seconds (5 minutes)
pub const CODE_TTL_SECONDS: u64 = 300;

/// Check whether a candidate string has the shape of an issued code.
///
/// A candidate that fails this check can never match a stored code, so
/// callers may reject it without a store round trip.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code.chars().all(|c| c.is_ascii_digit())
        && !code.starts_with('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_code_accepted() {
        assert!(is_well_formed("100000"));
        assert!(is_well_formed("483920"));
        assert!(is_well_formed("999999"));
    }

    #[test]
    fn test_wrong_width_rejected() {
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("1234567"));
        assert!(!is_well_formed(""));
    }

    #[test]
    fn test_non_digits_rejected() {
        assert!(!is_well_formed("12a456"));
        assert!(!is_well_formed("ABCDEF"));
        assert!(!is_well_formed("12345 "));
    }

    #[test]
    fn test_leading_zero_rejected() {
        assert!(!is_well_formed("012345"));
    }
}
