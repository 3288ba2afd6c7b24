//! Unit tests for domain error types

use crate::errors::{
    AuthError, DomainError, ErrorKind, TokenError, ValidationError, INVALID_TOKEN_MESSAGE,
    SERVER_ERROR_MESSAGE,
};
use tg_shared::errors::{ErrorResponse, IntoErrorResponse};

#[test]
fn test_codec_failures_collapse_to_invalid_token() {
    let failures = [
        TokenError::MalformedToken,
        TokenError::SignatureInvalid,
        TokenError::AlgorithmMismatch {
            algorithm: "HS256".to_string(),
        },
        TokenError::TokenExpired,
        TokenError::InvalidClaims,
        TokenError::NotYetEligible,
    ];

    for failure in failures {
        let error = DomainError::from(failure);
        assert_eq!(error.kind(), ErrorKind::InvalidToken);
        assert_eq!(error.public_messages(), vec![INVALID_TOKEN_MESSAGE.to_string()]);
    }
}

#[test]
fn test_store_failures_hide_internal_detail() {
    let error = DomainError::store("connection refused: mysql://root:secret@db");
    assert_eq!(error.kind(), ErrorKind::ServerError);

    let response = error.to_error_response();
    assert_eq!(response.kind, "server_error");
    assert_eq!(response.errors, vec![SERVER_ERROR_MESSAGE.to_string()]);
    assert!(!response.errors.iter().any(|m| m.contains("secret")));
}

#[test]
fn test_business_rejections_keep_their_kind() {
    assert_eq!(DomainError::from(AuthError::EmailExists).kind(), ErrorKind::EmailExists);
    assert_eq!(
        DomainError::from(AuthError::InvalidCredentials).kind(),
        ErrorKind::InvalidCredentials
    );
    assert_eq!(DomainError::from(AuthError::UserNotFound).kind(), ErrorKind::UserNotFound);
    assert_eq!(DomainError::from(AuthError::ExpiredToken).kind(), ErrorKind::ExpiredToken);
}

#[test]
fn test_validation_messages_are_returned_verbatim() {
    let error = DomainError::from(ValidationError::PasswordTooShort { min: 8 });
    let response: ErrorResponse = error.into();

    assert_eq!(response.kind, "validation_error");
    assert_eq!(response.errors, vec!["Password must be at least 8 characters".to_string()]);
}

#[test]
fn test_error_kind_codes() {
    assert_eq!(ErrorKind::InvalidToken.as_str(), "invalid_token");
    assert_eq!(ErrorKind::ExpiredToken.to_string(), "expired_token");
    assert!(ErrorKind::ExpiredToken.is_security_rejection());
    assert!(!ErrorKind::UserNotFound.is_security_rejection());
}
