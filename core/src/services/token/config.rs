//! Configuration for the token service

use chrono::Duration;
use tg_shared::config::JwtConfig;

/// Lifetimes and claim values used by the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// `iss` claim written and required
    pub issuer: String,
    /// `aud` claim written and required
    pub audience: String,
    /// Length of generated refresh token values
    pub refresh_token_length: usize,
    /// How long before access-token expiry a rotation is accepted
    pub early_refresh_window: Duration,
}

impl TokenServiceConfig {
    pub fn from_jwt_config(config: &JwtConfig) -> Self {
        Self {
            access_token_ttl: config.access_token_ttl(),
            refresh_token_ttl: config.refresh_token_ttl(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            refresh_token_length: config.refresh_token_length,
            early_refresh_window: config.early_refresh_window(),
        }
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    pub fn with_early_refresh_window(mut self, window: Duration) -> Self {
        self.early_refresh_window = window;
        self
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from_jwt_config(&JwtConfig::default())
    }
}
