//! In-memory refresh token store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::{hash_token_value, RefreshTokenRecord};
use crate::errors::{DomainError, DomainResult};

use super::r#trait::RefreshTokenStore;

#[derive(Default)]
struct Records {
    by_id: HashMap<Uuid, RefreshTokenRecord>,
    /// token hash -> record id
    by_hash: HashMap<String, Uuid>,
}

/// Refresh token store kept in process memory
///
/// Every mutation happens under a single write lock, which makes
/// `mark_used` a test-and-set.
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    records: RwLock<Records>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, whatever their state
    pub async fn len(&self) -> usize {
        self.records.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn insert(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord> {
        let mut records = self.records.write().await;

        if records.by_hash.contains_key(&record.token_hash) {
            return Err(DomainError::store("refresh token value already exists"));
        }
        if records.by_id.contains_key(&record.id) {
            return Err(DomainError::store(format!("refresh token {} already exists", record.id)));
        }

        records.by_hash.insert(record.token_hash.clone(), record.id);
        records.by_id.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_token_value(&self, token_value: &str) -> DomainResult<Option<RefreshTokenRecord>> {
        let records = self.records.read().await;
        let hash = hash_token_value(token_value);
        Ok(records
            .by_hash
            .get(&hash)
            .and_then(|id| records.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<RefreshTokenRecord>> {
        Ok(self.records.read().await.by_id.get(&id).cloned())
    }

    async fn mark_used(&self, id: Uuid) -> DomainResult<bool> {
        let mut records = self.records.write().await;
        match records.by_id.get_mut(&id) {
            Some(record) if !record.is_used && !record.is_revoked => {
                record.is_used = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke(&self, id: Uuid) -> DomainResult<bool> {
        let mut records = self.records.write().await;
        match records.by_id.get_mut(&id) {
            Some(record) if !record.is_revoked => {
                record.is_revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize> {
        let mut records = self.records.write().await;
        let mut count = 0;
        for record in records.by_id.values_mut() {
            if record.user_id == user_id && !record.is_revoked {
                record.is_revoked = true;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn prune_expired(&self, before: DateTime<Utc>) -> DomainResult<usize> {
        let mut records = self.records.write().await;
        let expired: Vec<(Uuid, String)> = records
            .by_id
            .values()
            .filter(|r| r.expires_at < before)
            .map(|r| (r.id, r.token_hash.clone()))
            .collect();

        for (id, hash) in &expired {
            records.by_id.remove(id);
            records.by_hash.remove(hash);
        }
        Ok(expired.len())
    }
}
