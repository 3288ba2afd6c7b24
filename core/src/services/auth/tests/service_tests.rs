//! Credential gateway tests

use std::sync::Arc;

use chrono::Duration;

use crate::domain::value_objects::{to_auth_result, LoginRequest, RegisterRequest, TokenRequest};
use crate::errors::{DomainError, ErrorKind, ValidationError};
use crate::repositories::{InMemoryRefreshTokenStore, InMemoryUserDirectory, UserDirectory};
use crate::services::auth::AuthService;
use crate::services::token::{SigningKeyProvider, TokenService, TokenServiceConfig};

const PASSWORD: &str = "correct horse battery";

fn gateway() -> AuthService<InMemoryRefreshTokenStore> {
    let users: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::with_cost(4));
    let keys = Arc::new(SigningKeyProvider::from_secret(b"gateway-test-secret-0123456789abcdef"));
    let config = TokenServiceConfig::default().with_access_token_ttl(Duration::zero());
    let tokens = Arc::new(TokenService::new(
        Arc::new(InMemoryRefreshTokenStore::new()),
        users.clone(),
        keys,
        config,
    ));
    AuthService::new(users, tokens)
}

#[tokio::test]
async fn test_register_issues_pair() {
    let auth = gateway();
    let pair = auth
        .register(RegisterRequest::new("Fan@Example.com", PASSWORD))
        .await
        .unwrap();

    let decoded = auth
        .token_service()
        .codec()
        .decode(&pair.access_token, crate::services::token::DecodeOptions::ignoring_expiry())
        .unwrap();
    assert_eq!(decoded.claims.email, "fan@example.com");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let auth = gateway();
    auth.register(RegisterRequest::new("fan@example.com", PASSWORD)).await.unwrap();

    let result = auth.register(RegisterRequest::new("FAN@example.com", PASSWORD)).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::EmailExists);
}

#[tokio::test]
async fn test_register_validation() {
    let auth = gateway();

    let result = auth.register(RegisterRequest::new("fan@example.com", "short")).await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::PasswordTooShort { min: 8 }))
    ));

    let result = auth.register(RegisterRequest::new("nobody", PASSWORD)).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::ValidationError);
}

#[tokio::test]
async fn test_login() {
    let auth = gateway();
    auth.register(RegisterRequest::new("fan@example.com", PASSWORD)).await.unwrap();

    assert!(auth.login(LoginRequest::new("fan@example.com", PASSWORD)).await.is_ok());

    let wrong_password = auth.login(LoginRequest::new("fan@example.com", "wrong password")).await;
    assert_eq!(wrong_password.unwrap_err().kind(), ErrorKind::InvalidCredentials);

    let unknown = auth.login(LoginRequest::new("nobody@example.com", PASSWORD)).await;
    assert_eq!(unknown.unwrap_err().kind(), ErrorKind::InvalidCredentials);
}

#[tokio::test]
async fn test_refresh_and_logout() {
    let auth = gateway();
    let pair = auth.register(RegisterRequest::new("fan@example.com", PASSWORD)).await.unwrap();

    let rotated = auth
        .refresh(TokenRequest::new(pair.access_token.clone(), pair.refresh_token.clone()))
        .await
        .unwrap();

    let replay = auth
        .refresh(TokenRequest::new(pair.access_token, pair.refresh_token))
        .await;
    let envelope = to_auth_result(&replay);
    assert!(!envelope.result);
    assert_eq!(envelope.kind.as_deref(), Some("invalid_token"));
    assert_eq!(envelope.errors, vec!["Invalid token".to_string()]);

    assert!(auth.logout(&rotated.refresh_token).await.unwrap());
    let after_logout = auth
        .refresh(TokenRequest::new(rotated.access_token, rotated.refresh_token))
        .await;
    assert_eq!(after_logout.unwrap_err().kind(), ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_refresh_requires_both_tokens() {
    let auth = gateway();
    let result = auth.refresh(TokenRequest::new("", "opaque")).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::ValidationError);
}
