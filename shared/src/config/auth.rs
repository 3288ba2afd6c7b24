//! Token signing and lifetime configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Placeholder secret shipped for local development only
const DEFAULT_SECRET: &str = "development-secret-please-change-in-production-0123456789";

/// Minimum key length accepted for HMAC-SHA-512 signing
pub const MIN_SECRET_LENGTH: usize = 32;

/// Minimum length of generated refresh-token values
pub const MIN_REFRESH_TOKEN_LENGTH: usize = 16;

/// Longest accepted refresh token lifetime, ten years
pub const MAX_REFRESH_TOKEN_TTL_SECONDS: i64 = 10 * 365 * 86_400;

/// JWT and refresh-token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric signing key material
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_ttl_seconds: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim, checked on every decode
    pub audience: String,

    /// Number of characters in a generated refresh token
    #[serde(default = "default_refresh_token_length")]
    pub refresh_token_length: usize,

    /// How long before access-token expiry a rotation is already accepted
    #[serde(default)]
    pub early_refresh_window_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_ttl_seconds: 300,          // 5 minutes
            refresh_token_ttl_seconds: 15_552_000,  // 180 days
            issuer: String::from("tollgate"),
            audience: String::from("tollgate-api"),
            refresh_token_length: default_refresh_token_length(),
            early_refresh_window_seconds: 0,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl_seconds = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_ttl_days(mut self, days: i64) -> Self {
        self.refresh_token_ttl_seconds = days.saturating_mul(86_400);
        self
    }

    /// Set issuer and audience
    pub fn with_issuer_audience(mut self, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self.audience = audience.into();
        self
    }

    /// Set the early refresh window in seconds
    pub fn with_early_refresh_window_seconds(mut self, seconds: i64) -> Self {
        self.early_refresh_window_seconds = seconds;
        self
    }

    pub fn access_token_ttl(&self) -> Duration {
        seconds(self.access_token_ttl_seconds)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        seconds(self.refresh_token_ttl_seconds)
    }

    pub fn early_refresh_window(&self) -> Duration {
        seconds(self.early_refresh_window_seconds)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Reject configurations that would produce weak or inconsistent tokens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "jwt.secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }
        if self.access_token_ttl_seconds < 0 || self.refresh_token_ttl_seconds < 0 {
            return Err(ConfigError::Invalid("token lifetimes must not be negative".into()));
        }
        if self.refresh_token_ttl_seconds <= self.access_token_ttl_seconds {
            return Err(ConfigError::Invalid(
                "jwt.refresh_token_ttl_seconds must exceed jwt.access_token_ttl_seconds".into(),
            ));
        }
        if self.refresh_token_ttl_seconds > MAX_REFRESH_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "jwt.refresh_token_ttl_seconds must not exceed {}",
                MAX_REFRESH_TOKEN_TTL_SECONDS
            )));
        }
        if self.early_refresh_window_seconds < 0
            || self.early_refresh_window_seconds > self.access_token_ttl_seconds
        {
            return Err(ConfigError::Invalid(
                "jwt.early_refresh_window_seconds must lie between 0 and the access token lifetime".into(),
            ));
        }
        if self.issuer.trim().is_empty() || self.audience.trim().is_empty() {
            return Err(ConfigError::Invalid("jwt.issuer and jwt.audience are required".into()));
        }
        if self.refresh_token_length < MIN_REFRESH_TOKEN_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "jwt.refresh_token_length must be at least {}",
                MIN_REFRESH_TOKEN_LENGTH
            )));
        }
        Ok(())
    }
}

/// Seconds to a duration, saturating instead of panicking on out-of-range values
fn seconds(value: i64) -> Duration {
    Duration::try_seconds(value).unwrap_or_else(|| {
        if value < 0 {
            Duration::min_value()
        } else {
            Duration::max_value()
        }
    })
}

fn default_refresh_token_length() -> usize {
    32
}
