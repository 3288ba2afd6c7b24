//! Token lifecycle manager: issuance and single-use rotation

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use tg_shared::config::JwtConfig;

use crate::domain::entities::token::{AccessTokenClaims, RefreshTokenRecord, TokenPair};
use crate::errors::{AuthError, DomainError, DomainResult, ErrorKind, TokenError};
use crate::repositories::{RefreshTokenStore, UserDirectory};

use super::codec::{AccessTokenCodec, DecodeOptions, DecodedToken};
use super::config::TokenServiceConfig;
use super::generator::RefreshTokenGenerator;
use super::key_manager::SigningKeyProvider;

/// Issues token pairs and rotates them
///
/// The service is the only writer of refresh record state. A rotation
/// mutates the store twice at most: the conditional `mark_used` of the
/// presented record, then the insert of the new one.
pub struct TokenService<S: RefreshTokenStore> {
    pub(crate) store: Arc<S>,
    users: Arc<dyn UserDirectory>,
    codec: AccessTokenCodec,
    generator: RefreshTokenGenerator,
    config: TokenServiceConfig,
}

impl<S: RefreshTokenStore> TokenService<S> {
    pub fn new(
        store: Arc<S>,
        users: Arc<dyn UserDirectory>,
        keys: Arc<SigningKeyProvider>,
        config: TokenServiceConfig,
    ) -> Self {
        let codec = AccessTokenCodec::new(keys, config.issuer.clone(), config.audience.clone());
        let generator = RefreshTokenGenerator::new(config.refresh_token_length);
        Self {
            store,
            users,
            codec,
            generator,
            config,
        }
    }

    /// Build a service from the application's JWT configuration
    pub fn from_jwt_config(store: Arc<S>, users: Arc<dyn UserDirectory>, jwt: &JwtConfig) -> Self {
        Self::new(
            store,
            users,
            Arc::new(SigningKeyProvider::from_config(jwt)),
            TokenServiceConfig::from_jwt_config(jwt),
        )
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn codec(&self) -> &AccessTokenCodec {
        &self.codec
    }

    /// Issue a fresh access/refresh pair for a user
    ///
    /// Nothing is returned unless the refresh record was stored; on a store
    /// failure the signed access token is dropped.
    pub async fn issue(&self, user_id: Uuid, email: &str) -> DomainResult<TokenPair> {
        self.issue_pair(user_id, email).await.map_err(|e| {
            error!(
                user_id = %user_id,
                error = %e,
                event = "token_issue_failed",
                "Failed to issue token pair"
            );
            e
        })
    }

    /// Issuance without failure logging; rotation reports its own failures
    async fn issue_pair(&self, user_id: Uuid, email: &str) -> DomainResult<TokenPair> {
        let claims = AccessTokenClaims::new(user_id, email);
        let access_token = self.codec.encode(&claims, self.config.access_token_ttl)?;

        let refresh_token = self.generator.generate();
        let record = RefreshTokenRecord::new(
            user_id,
            claims.token_id,
            &refresh_token,
            self.config.refresh_token_ttl,
        )?;
        self.store.insert(record).await?;

        info!(
            user_id = %user_id,
            token_id = %claims.token_id,
            event = "token_pair_issued",
            "Issued token pair"
        );

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl,
            self.config.refresh_token_ttl,
        ))
    }

    /// Exchange an access token and its refresh token for a new pair
    ///
    /// # Errors
    /// * `AuthError::InvalidToken` - undecodable or tampered access token, token not
    ///   yet eligible, unknown/used/revoked refresh token, mismatched pair, lost race
    /// * `AuthError::ExpiredToken` - refresh record past its expiry
    /// * `AuthError::UserNotFound` - the user no longer exists
    /// * `DomainError::Internal` - any store or unexpected failure
    pub async fn refresh(&self, access_token: &str, refresh_token: &str) -> DomainResult<TokenPair> {
        match self.rotate(access_token, refresh_token).await {
            Ok(pair) => Ok(pair),
            Err(e) => Err(self.report_refresh_failure(e)),
        }
    }

    async fn rotate(&self, access_token: &str, refresh_token: &str) -> DomainResult<TokenPair> {
        let now = Utc::now();
        let decoded = self.codec.decode(access_token, DecodeOptions::ignoring_expiry())?;

        let eligible_from = decoded
            .expires_at
            .checked_sub_signed(self.config.early_refresh_window);
        if eligible_from.is_some_and(|from| now < from) {
            return Err(TokenError::NotYetEligible.into());
        }

        let record = match self.store.find_by_token_value(refresh_token).await? {
            Some(record) => record,
            None => return Err(self.reject(&decoded, "unknown_refresh_token")),
        };

        if record.is_used || record.is_revoked {
            return Err(self.reject(&decoded, "refresh_token_terminal"));
        }

        if record.jwt_id != decoded.token_id || record.user_id != decoded.claims.subject_id {
            return Err(self.reject(&decoded, "token_pair_mismatch"));
        }

        if record.is_expired_at(now) {
            warn!(
                user_id = %record.user_id,
                token_id = %decoded.token_id,
                event = "refresh_rejected",
                reason = "refresh_token_expired",
                "Token refresh rejected"
            );
            return Err(AuthError::ExpiredToken.into());
        }

        if !self.store.mark_used(record.id).await? {
            return Err(self.reject(&decoded, "refresh_token_reuse"));
        }

        let user = match self.users.find_by_id(record.user_id).await? {
            Some(user) => user,
            None => {
                debug!(
                    user_id = %record.user_id,
                    event = "refresh_user_missing",
                    "Refresh token belongs to an unknown user"
                );
                return Err(AuthError::UserNotFound.into());
            }
        };

        let pair = self.issue_pair(user.id, &user.email).await?;
        info!(
            user_id = %user.id,
            previous_token_id = %decoded.token_id,
            event = "token_pair_rotated",
            "Rotated token pair"
        );
        Ok(pair)
    }

    fn reject(&self, decoded: &DecodedToken, reason: &'static str) -> DomainError {
        warn!(
            user_id = %decoded.claims.subject_id,
            token_id = %decoded.token_id,
            event = "refresh_rejected",
            reason = reason,
            "Token refresh rejected"
        );
        AuthError::InvalidToken.into()
    }

    /// Log a failed rotation and collapse it into what the caller may see
    fn report_refresh_failure(&self, error: DomainError) -> DomainError {
        match error.kind() {
            ErrorKind::ServerError => {
                error!(error = %error, event = "refresh_failed", "Token refresh failed");
                if matches!(error, DomainError::Internal { .. }) {
                    error
                } else {
                    DomainError::internal(error.to_string())
                }
            }
            ErrorKind::InvalidToken => {
                if let DomainError::Token(ref reason) = error {
                    warn!(
                        reason = %reason,
                        event = "refresh_rejected",
                        "Token refresh rejected"
                    );
                }
                AuthError::InvalidToken.into()
            }
            _ => error,
        }
    }

    /// Fully validate an access token, expiry included
    pub fn verify_access_token(&self, token: &str) -> DomainResult<DecodedToken> {
        self.codec
            .decode(token, DecodeOptions::strict())
            .map_err(DomainError::from)
    }

    /// Revoke the record behind a refresh token value
    ///
    /// # Returns
    /// * `Ok(true)` - The record was revoked by this call
    /// * `Ok(false)` - Unknown value or already revoked
    pub async fn revoke(&self, refresh_token: &str) -> DomainResult<bool> {
        let Some(record) = self.store.find_by_token_value(refresh_token).await? else {
            return Ok(false);
        };

        let revoked = self.store.revoke(record.id).await?;
        if revoked {
            info!(
                user_id = %record.user_id,
                token_id = %record.jwt_id,
                event = "refresh_token_revoked",
                "Revoked refresh token"
            );
        }
        Ok(revoked)
    }

    /// Revoke every refresh record of a user
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize> {
        let count = self.store.revoke_all_for_user(user_id).await?;
        info!(
            user_id = %user_id,
            count = count,
            event = "refresh_tokens_revoked",
            "Revoked all refresh tokens for user"
        );
        Ok(count)
    }
}
