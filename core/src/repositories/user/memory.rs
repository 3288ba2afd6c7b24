//! In-memory user directory backed by bcrypt password hashes

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{normalize_email, UserAccount};
use crate::errors::{AuthError, DomainError, DomainResult};

use super::trait_::UserDirectory;

struct StoredUser {
    account: UserAccount,
    password_hash: String,
}

/// User directory kept in process memory, for tests and embedding
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<Uuid, StoredUser>>,
    bcrypt_cost: u32,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Use a specific bcrypt cost (tests use the minimum, 4)
    pub fn with_cost(bcrypt_cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            bcrypt_cost,
        }
    }

    /// Remove a user, returning whether it existed
    pub async fn remove(&self, id: Uuid) -> bool {
        self.users.write().await.remove(&id).is_some()
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<UserAccount>> {
        let email = normalize_email(email);
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.account.email == email)
            .map(|u| u.account.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<UserAccount>> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(|u| u.account.clone()))
    }

    async fn verify_password(&self, user: &UserAccount, password: &str) -> DomainResult<bool> {
        let users = self.users.read().await;
        let Some(stored) = users.get(&user.id) else {
            return Ok(false);
        };
        bcrypt::verify(password, &stored.password_hash)
            .map_err(|e| DomainError::internal(format!("password verification failed: {}", e)))
    }

    async fn create(&self, email: &str, password: &str) -> DomainResult<UserAccount> {
        let password_hash = bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))?;
        let account = UserAccount::new(email);

        let mut users = self.users.write().await;
        if users.values().any(|u| u.account.email == account.email) {
            return Err(AuthError::EmailExists.into());
        }
        users.insert(
            account.id,
            StoredUser {
                account: account.clone(),
                password_hash,
            },
        );
        Ok(account)
    }
}
