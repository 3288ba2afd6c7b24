//! Shared fixtures for token service tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::domain::entities::user::UserAccount;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    InMemoryRefreshTokenStore, InMemoryUserDirectory, RefreshTokenStore, UserDirectory,
};
use crate::services::token::{
    AccessTokenCodec, SigningKeyProvider, TokenService, TokenServiceConfig,
};

pub const SECRET: &[u8] = b"unit-test-signing-secret-0123456789abcdef";
pub const ISSUER: &str = "tollgate";
pub const AUDIENCE: &str = "tollgate-api";

pub fn keys() -> Arc<SigningKeyProvider> {
    Arc::new(SigningKeyProvider::from_secret(SECRET))
}

pub fn codec() -> AccessTokenCodec {
    AccessTokenCodec::new(keys(), ISSUER, AUDIENCE)
}

/// Default lifetimes, but access tokens are eligible for rotation at once
pub fn immediate_config() -> TokenServiceConfig {
    TokenServiceConfig::default().with_access_token_ttl(Duration::zero())
}

pub struct Harness<S: RefreshTokenStore> {
    pub service: Arc<TokenService<S>>,
    pub store: Arc<S>,
    pub users: Arc<InMemoryUserDirectory>,
}

impl<S: RefreshTokenStore> Harness<S> {
    pub fn with_store(store: S, config: TokenServiceConfig) -> Self {
        let store = Arc::new(store);
        let users = Arc::new(InMemoryUserDirectory::with_cost(4));
        let directory: Arc<dyn UserDirectory> = users.clone();
        let service = Arc::new(TokenService::new(store.clone(), directory, keys(), config));
        Self {
            service,
            store,
            users,
        }
    }

    pub async fn user(&self, email: &str) -> UserAccount {
        self.users.create(email, "correct horse battery").await.unwrap()
    }
}

pub fn harness(config: TokenServiceConfig) -> Harness<InMemoryRefreshTokenStore> {
    Harness::with_store(InMemoryRefreshTokenStore::new(), config)
}

/// Store whose inserts can be made to fail on demand
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryRefreshTokenStore,
    fail_inserts: AtomicBool,
}

impl FlakyStore {
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RefreshTokenStore for FlakyStore {
    async fn insert(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::store("connection reset by peer"));
        }
        self.inner.insert(record).await
    }

    async fn find_by_token_value(&self, token_value: &str) -> DomainResult<Option<RefreshTokenRecord>> {
        self.inner.find_by_token_value(token_value).await
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<RefreshTokenRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn mark_used(&self, id: Uuid) -> DomainResult<bool> {
        self.inner.mark_used(id).await
    }

    async fn revoke(&self, id: Uuid) -> DomainResult<bool> {
        self.inner.revoke(id).await
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize> {
        self.inner.revoke_all_for_user(user_id).await
    }

    async fn prune_expired(&self, before: DateTime<Utc>) -> DomainResult<usize> {
        self.inner.prune_expired(before).await
    }
}
