//! One-shot pruning of long-expired refresh token records
//!
//! Loads the application configuration, ensures the schema and runs a
//! single cleanup cycle. Intended for cron or a scheduled job.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use tg_core::services::token::MAX_GRACE_PERIOD_DAYS;
use tg_core::services::{TokenCleanupConfig, TokenCleanupService};
use tg_infra::database::{DatabasePool, MySqlRefreshTokenStore};
use tg_shared::{init_tracing, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    let grace_period_days = std::env::var("TOLLGATE_PRUNE_GRACE_DAYS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .map(|days| days.clamp(0, MAX_GRACE_PERIOD_DAYS))
        .unwrap_or(TokenCleanupConfig::default().grace_period_days);

    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the refresh token store")?;
    let store = Arc::new(MySqlRefreshTokenStore::new(pool.get_pool().clone()));
    store.ensure_schema().await?;

    let cleanup = TokenCleanupService::new(
        store,
        TokenCleanupConfig {
            grace_period_days,
            enabled: true,
        },
    );
    let result = cleanup.run_cleanup().await?;

    if result.is_success() {
        info!(
            deleted = result.expired_tokens_deleted,
            grace_period_days = grace_period_days,
            "Refresh token pruning finished"
        );
    } else {
        for e in &result.errors {
            warn!(error = %e, "Refresh token pruning reported an error");
        }
    }

    info!("{}", pool.get_statistics());
    pool.close().await;

    if result.is_success() {
        Ok(())
    } else {
        anyhow::bail!("refresh token pruning failed")
    }
}
