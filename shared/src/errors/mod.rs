//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned to callers of the issue and refresh operations
///
/// `kind` is one of the stable codes in [`error_codes`]; `errors` holds the
/// human-readable messages. Internal detail never reaches this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind
    pub kind: String,

    /// Human-readable messages
    pub errors: Vec<String>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create an error response with a single message
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_messages(kind, vec![message.into()])
    }

    /// Create an error response carrying several messages
    pub fn with_messages(kind: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            errors,
            timestamp: Utc::now(),
        }
    }

    /// Append another message
    pub fn add_message(mut self, message: impl Into<String>) -> Self {
        self.errors.push(message.into());
        self
    }

    /// Whether this response reports an unexpected failure
    pub fn is_server_error(&self) -> bool {
        self.kind == error_codes::SERVER_ERROR
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.errors.join("; "))
    }
}

/// Stable error kinds exposed at the boundary
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const EMAIL_EXISTS: &str = "email_exists";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const USER_NOT_FOUND: &str = "user_not_found";
    pub const INVALID_TOKEN: &str = "invalid_token";
    pub const EXPIRED_TOKEN: &str = "expired_token";
    pub const SERVER_ERROR: &str = "server_error";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}
