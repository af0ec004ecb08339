//! Business services for the verification lifecycle

pub mod verification;

pub use verification::{CodeStore, VerificationConfig, VerificationService};
