//! Refresh token store trait defining the persistence contract for refresh records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainResult;

/// Keyed persistence of refresh token records
///
/// Implementations look records up by the SHA-256 digest of the bearer value
/// and must never clear `is_used` or `is_revoked` once set.
///
/// # Concurrency
/// [`mark_used`](RefreshTokenStore::mark_used) is the one synchronisation
/// point of the rotation protocol. It must be a single conditional update so
/// that, of any number of concurrent callers, exactly one observes `true`.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persist a new record
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The stored record
    /// * `Err(DomainError::Store)` - Persistence failed or the value already exists
    async fn insert(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord>;

    /// Find a record by its bearer value
    ///
    /// # Example
    /// ```no_run
    /// # use tg_core::repositories::RefreshTokenStore;
    /// # async fn example(store: &impl RefreshTokenStore) -> Result<(), Box<dyn std::error::Error>> {
    /// match store.find_by_token_value("presented_refresh_token").await? {
    ///     Some(record) if record.is_active() => println!("active for {}", record.user_id),
    ///     Some(_) => println!("terminal"),
    ///     None => println!("unknown"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_token_value(&self, token_value: &str) -> DomainResult<Option<RefreshTokenRecord>>;

    /// Find a record by its identifier
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<RefreshTokenRecord>>;

    /// Atomically flip an Active record to Used
    ///
    /// # Returns
    /// * `Ok(true)` - This caller performed the transition
    /// * `Ok(false)` - The record was already used, revoked or absent
    async fn mark_used(&self, id: Uuid) -> DomainResult<bool>;

    /// Set the revoked flag on a record
    ///
    /// # Returns
    /// * `Ok(true)` - The flag was newly set
    /// * `Ok(false)` - Already revoked or not found
    async fn revoke(&self, id: Uuid) -> DomainResult<bool>;

    /// Revoke every record of a user, returning how many were newly revoked
    async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize>;

    /// Delete records whose `expires_at` lies before `before`
    async fn prune_expired(&self, before: DateTime<Utc>) -> DomainResult<usize>;
}
