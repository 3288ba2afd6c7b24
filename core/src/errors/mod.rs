//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError, ValidationError};

use tg_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Message returned for every unexpected failure
pub const SERVER_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Message returned for every rejected token, whatever the internal reason
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Stable, machine-readable error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ValidationError,
    EmailExists,
    InvalidCredentials,
    UserNotFound,
    InvalidToken,
    ExpiredToken,
    ServerError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => error_codes::VALIDATION_ERROR,
            ErrorKind::EmailExists => error_codes::EMAIL_EXISTS,
            ErrorKind::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            ErrorKind::UserNotFound => error_codes::USER_NOT_FOUND,
            ErrorKind::InvalidToken => error_codes::INVALID_TOKEN,
            ErrorKind::ExpiredToken => error_codes::EXPIRED_TOKEN,
            ErrorKind::ServerError => error_codes::SERVER_ERROR,
        }
    }

    /// Security rejections hide their cause from the caller
    pub fn is_security_rejection(&self) -> bool {
        matches!(self, ErrorKind::InvalidToken | ErrorKind::ExpiredToken)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomainError {
    pub fn store(message: impl Into<String>) -> Self {
        DomainError::Store {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Collapse the internal taxonomy into the kind reported to callers
    ///
    /// Every codec failure, including an expired access token, is an
    /// `InvalidToken`. Only a refresh record past its expiry is `ExpiredToken`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::ValidationError,
            DomainError::Auth(AuthError::EmailExists) => ErrorKind::EmailExists,
            DomainError::Auth(AuthError::InvalidCredentials) => ErrorKind::InvalidCredentials,
            DomainError::Auth(AuthError::UserNotFound) => ErrorKind::UserNotFound,
            DomainError::Auth(AuthError::InvalidToken) => ErrorKind::InvalidToken,
            DomainError::Auth(AuthError::ExpiredToken) => ErrorKind::ExpiredToken,
            DomainError::Token(TokenError::TokenGenerationFailed) => ErrorKind::ServerError,
            DomainError::Token(_) => ErrorKind::InvalidToken,
            DomainError::Store { .. } | DomainError::Internal { .. } => ErrorKind::ServerError,
        }
    }

    /// Messages safe to hand to the caller
    pub fn public_messages(&self) -> Vec<String> {
        match self.kind() {
            ErrorKind::ServerError => vec![SERVER_ERROR_MESSAGE.to_string()],
            ErrorKind::InvalidToken => vec![INVALID_TOKEN_MESSAGE.to_string()],
            ErrorKind::ExpiredToken => vec![AuthError::ExpiredToken.to_string()],
            _ => vec![self.to_string()],
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::with_messages(self.kind().as_str(), self.public_messages())
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(error: DomainError) -> Self {
        error.to_error_response()
    }
}
