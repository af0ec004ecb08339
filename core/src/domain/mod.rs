//! Domain model for verification codes

pub mod verification_code;
