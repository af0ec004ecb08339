//! Utility functions shared across server crates

pub mod email;
