//! Pruning of long-expired refresh token records
//!
//! Expired records are kept for a grace period so replays of recently
//! expired tokens still hit a stored record. Pruning only runs when invoked.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info};

use crate::errors::DomainResult;
use crate::repositories::RefreshTokenStore;

/// Longest accepted grace period, ten years
pub const MAX_GRACE_PERIOD_DAYS: i64 = 3650;

/// Configuration for token cleanup
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// Days a record is kept after it expired
    pub grace_period_days: i64,
    /// Whether cleanup does anything at all
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            grace_period_days: 7,
            enabled: true,
        }
    }
}

/// Deletes refresh records expired for longer than the grace period
pub struct TokenCleanupService<S: RefreshTokenStore> {
    store: Arc<S>,
    config: TokenCleanupConfig,
}

impl TokenCleanupConfig {
    /// Grace period clamped to `0..=MAX_GRACE_PERIOD_DAYS`
    pub fn grace_period(&self) -> Duration {
        Duration::days(self.grace_period_days.clamp(0, MAX_GRACE_PERIOD_DAYS))
    }
}

impl<S: RefreshTokenStore> TokenCleanupService<S> {
    pub fn new(store: Arc<S>, config: TokenCleanupConfig) -> Self {
        Self { store, config }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of the cycle; store failures are
    ///   reported in `errors` rather than aborting
    pub async fn run_cleanup(&self) -> DomainResult<CleanupResult> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        info!("Starting token cleanup cycle");

        let cutoff = Utc::now() - self.config.grace_period();
        let mut result = CleanupResult::default();

        match self.store.prune_expired(cutoff).await {
            Ok(count) => {
                result.expired_tokens_deleted = count;
                info!(count = count, cutoff = %cutoff, "Deleted expired refresh tokens");
            }
            Err(e) => {
                error!("Failed to cleanup expired tokens: {}", e);
                result.errors.push(format!("Token cleanup error: {}", e));
            }
        }

        Ok(result)
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired refresh tokens deleted
    pub expired_tokens_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
