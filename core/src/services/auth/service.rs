//! Credential gateway: register, login, refresh and logout

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::{LoginRequest, RegisterRequest, TokenRequest};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{RefreshTokenStore, UserDirectory};
use crate::services::token::TokenService;

/// Thin adapter between callers, the user directory and the token service
///
/// Adds input validation and existence checks; everything else is delegated.
pub struct AuthService<S: RefreshTokenStore> {
    users: Arc<dyn UserDirectory>,
    token_service: Arc<TokenService<S>>,
}

impl<S: RefreshTokenStore> AuthService<S> {
    pub fn new(users: Arc<dyn UserDirectory>, token_service: Arc<TokenService<S>>) -> Self {
        Self {
            users,
            token_service,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<S>> {
        &self.token_service
    }

    /// Create an account and issue its first token pair
    ///
    /// # Errors
    /// * `ValidationError` - missing field, malformed email, short password
    /// * `AuthError::EmailExists` - the email is already registered
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<TokenPair> {
        request.check()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            debug!(event = "register_rejected", reason = "email_exists", "Registration rejected");
            return Err(AuthError::EmailExists.into());
        }

        let user = self.users.create(&request.email, &request.password).await?;
        info!(user_id = %user.id, event = "user_registered", "Registered user");

        self.token_service.issue(user.id, &user.email).await
    }

    /// Verify credentials and issue a token pair
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> DomainResult<TokenPair> {
        request.check()?;

        let Some(user) = self.users.find_by_email(&request.email).await? else {
            debug!(event = "login_rejected", reason = "unknown_email", "Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.users.verify_password(&user, &request.password).await? {
            debug!(user_id = %user.id, event = "login_rejected", reason = "wrong_password", "Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.token_service.issue(user.id, &user.email).await
    }

    /// Rotate a token pair
    pub async fn refresh(&self, request: TokenRequest) -> DomainResult<TokenPair> {
        request.check()?;
        self.token_service
            .refresh(&request.token, &request.refresh_token)
            .await
    }

    /// Revoke a refresh token; unknown tokens are not an error
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<bool> {
        self.token_service.revoke(refresh_token).await
    }
}
