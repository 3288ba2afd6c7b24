//! Tests for the credential gateway

mod service_tests;
