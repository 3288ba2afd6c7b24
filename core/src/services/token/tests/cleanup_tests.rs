//! Refresh record pruning

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::repositories::{InMemoryRefreshTokenStore, RefreshTokenStore};
use crate::services::token::{TokenCleanupConfig, TokenCleanupService, MAX_GRACE_PERIOD_DAYS};

fn expired_days_ago(value: &str, days: i64) -> RefreshTokenRecord {
    let mut record = RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), value, Duration::days(1)).unwrap();
    record.expires_at = Utc::now() - Duration::days(days);
    record
}

#[tokio::test]
async fn test_cleanup_respects_grace_period() {
    let store = Arc::new(InMemoryRefreshTokenStore::new());
    store.insert(expired_days_ago("long_gone", 30)).await.unwrap();
    store.insert(expired_days_ago("recently_expired", 2)).await.unwrap();
    store
        .insert(RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), "active", Duration::days(1)).unwrap())
        .await
        .unwrap();

    let cleanup = TokenCleanupService::new(store.clone(), TokenCleanupConfig::default());
    let result = cleanup.run_cleanup().await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.expired_tokens_deleted, 1);
    assert!(store.find_by_token_value("long_gone").await.unwrap().is_none());
    assert!(store.find_by_token_value("recently_expired").await.unwrap().is_some());
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_disabled_cleanup_does_nothing() {
    let store = Arc::new(InMemoryRefreshTokenStore::new());
    store.insert(expired_days_ago("long_gone", 30)).await.unwrap();

    let config = TokenCleanupConfig {
        enabled: false,
        ..Default::default()
    };
    let result = TokenCleanupService::new(store.clone(), config).run_cleanup().await.unwrap();

    assert_eq!(result.expired_tokens_deleted, 0);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_extreme_grace_period_is_clamped() {
    let store = Arc::new(InMemoryRefreshTokenStore::new());
    store.insert(expired_days_ago("long_gone", 30)).await.unwrap();

    let config = TokenCleanupConfig {
        grace_period_days: i64::MAX,
        enabled: true,
    };
    assert_eq!(config.grace_period(), Duration::days(MAX_GRACE_PERIOD_DAYS));
    let result = TokenCleanupService::new(store.clone(), config).run_cleanup().await.unwrap();
    assert_eq!(result.expired_tokens_deleted, 0);

    let config = TokenCleanupConfig {
        grace_period_days: -5,
        enabled: true,
    };
    let result = TokenCleanupService::new(store.clone(), config).run_cleanup().await.unwrap();
    assert_eq!(result.expired_tokens_deleted, 1);
}
