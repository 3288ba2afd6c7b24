//! User directory trait: the external identity store the gateway delegates to.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainResult;

/// Credential storage and password verification owned by the host application
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use tg_core::domain::entities::user::UserAccount;
/// use tg_core::errors::DomainResult;
/// use tg_core::repositories::UserDirectory;
///
/// struct LdapDirectory;
///
/// #[async_trait]
/// impl UserDirectory for LdapDirectory {
///     async fn find_by_email(&self, email: &str) -> DomainResult<Option<UserAccount>> {
///         Ok(None)
///     }
///     async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<UserAccount>> {
///         Ok(None)
///     }
///     async fn verify_password(&self, user: &UserAccount, password: &str) -> DomainResult<bool> {
///         Ok(false)
///     }
///     async fn create(&self, email: &str, password: &str) -> DomainResult<UserAccount> {
///         unimplemented!()
///     }
/// }
/// ```
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look a user up by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<UserAccount>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<UserAccount>>;

    /// Check `password` against the stored credential of `user`
    async fn verify_password(&self, user: &UserAccount, password: &str) -> DomainResult<bool>;

    /// Create a user
    ///
    /// # Returns
    /// * `Ok(UserAccount)` - The new account
    /// * `Err(DomainError::Auth(AuthError::EmailExists))` - Email already taken
    async fn create(&self, email: &str, password: &str) -> DomainResult<UserAccount>;
}
