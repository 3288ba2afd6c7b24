//! Value objects representing immutable domain concepts.

pub mod auth_request;
pub mod auth_response;

// Re-export commonly used types
pub use auth_request::{LoginRequest, RegisterRequest, TokenRequest, MIN_PASSWORD_LENGTH};
pub use auth_response::to_auth_result;
