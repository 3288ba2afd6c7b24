//! Error type definitions for authentication, token handling and validation
//!
//! Messages here are internal. What callers see is produced by
//! [`DomainError::public_messages`](super::DomainError::public_messages).

use thiserror::Error;

/// Authentication and rotation outcomes reported to callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Refresh token expired")]
    ExpiredToken,
}

/// Access token codec failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid signature")]
    SignatureInvalid,

    #[error("Unexpected signing algorithm: {algorithm}")]
    AlgorithmMismatch { algorithm: String },

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Access token not yet eligible for rotation")]
    NotYetEligible,
}

/// Input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: u64 },
}
