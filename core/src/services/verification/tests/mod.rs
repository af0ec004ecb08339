//! Tests for the verification service

mod service_tests;
