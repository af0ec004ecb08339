//! Verification code generation

use rand::{rngs::OsRng, Rng};

use crate::domain::verification_code::{CODE_MAX, CODE_MIN};

/// Generate a fresh verification code.
///
/// Draws uniformly from [100000, 999999] using the OS CSPRNG, so codes are
/// fixed width with no leading zero and carry no predictable correlation
/// across calls. `OsRng` is constructed per call; there is no shared
/// generator state to contend on. Generation is infallible: if the OS
/// entropy source is unusable that is a fatal platform condition, not a
/// per-call error.
pub fn generate_code() -> String {
    let mut rng = OsRng;
    rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verification_code::{is_well_formed, CODE_LENGTH};

    #[test]
    fn test_generated_codes_are_well_formed() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(is_well_formed(&code), "malformed code: {}", code);
        }
    }

    #[test]
    fn test_generated_codes_stay_in_range() {
        for _ in 0..1000 {
            let value: u32 = generate_code().parse().unwrap();
            assert!((CODE_MIN..=CODE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| generate_code()).collect();
        // 50 identical draws from a 900k range would mean a broken source
        assert!(codes.len() > 1);
    }
}
