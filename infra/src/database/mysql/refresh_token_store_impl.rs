//! MySQL implementation of RefreshTokenStore
//!
//! Records live in the `refresh_tokens` table keyed by id, with a unique
//! index on the SHA-256 digest of the bearer value.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use tg_core::domain::entities::token::{hash_token_value, RefreshTokenRecord};
use tg_core::errors::{DomainError, DomainResult};
use tg_core::repositories::RefreshTokenStore;

/// DDL for the refresh token table
pub const REFRESH_TOKENS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS refresh_tokens (
    id CHAR(36) NOT NULL PRIMARY KEY,
    user_id CHAR(36) NOT NULL,
    jwt_id CHAR(36) NOT NULL,
    token_hash CHAR(64) NOT NULL,
    created_at DATETIME(6) NOT NULL,
    expires_at DATETIME(6) NOT NULL,
    is_used BOOLEAN NOT NULL DEFAULT FALSE,
    is_revoked BOOLEAN NOT NULL DEFAULT FALSE,
    UNIQUE KEY uk_refresh_tokens_token_hash (token_hash),
    KEY idx_refresh_tokens_user_id (user_id),
    KEY idx_refresh_tokens_expires_at (expires_at)
)
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, jwt_id, token_hash, created_at, expires_at, is_used, is_revoked FROM refresh_tokens";

const MARK_USED_SQL: &str =
    "UPDATE refresh_tokens SET is_used = TRUE WHERE id = ? AND is_used = FALSE AND is_revoked = FALSE";

const REVOKE_SQL: &str = "UPDATE refresh_tokens SET is_revoked = TRUE WHERE id = ? AND is_revoked = FALSE";

const REVOKE_ALL_SQL: &str =
    "UPDATE refresh_tokens SET is_revoked = TRUE WHERE user_id = ? AND is_revoked = FALSE";

const PRUNE_SQL: &str = "DELETE FROM refresh_tokens WHERE expires_at < ?";

/// MySQL-backed refresh token store
#[derive(Clone)]
pub struct MySqlRefreshTokenStore {
    pool: MySqlPool,
}

impl MySqlRefreshTokenStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create the `refresh_tokens` table if it does not exist
    pub async fn ensure_schema(&self) -> DomainResult<()> {
        sqlx::query(REFRESH_TOKENS_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to create refresh_tokens table: {}", e)))?;
        Ok(())
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        value: String,
    ) -> DomainResult<Option<RefreshTokenRecord>> {
        let sql = format!("{} WHERE {}", SELECT_COLUMNS, condition);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to query refresh token: {}", e)))?;

        row.map(|row| RefreshTokenRow::from_row(&row)?.into_record())
            .transpose()
    }
}

/// Raw column values of a `refresh_tokens` row
#[derive(Debug, Clone)]
struct RefreshTokenRow {
    id: String,
    user_id: String,
    jwt_id: String,
    token_hash: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    is_used: bool,
    is_revoked: bool,
}

impl RefreshTokenRow {
    fn from_row(row: &MySqlRow) -> DomainResult<Self> {
        Ok(Self {
            id: get_column(row, "id")?,
            user_id: get_column(row, "user_id")?,
            jwt_id: get_column(row, "jwt_id")?,
            token_hash: get_column(row, "token_hash")?,
            created_at: get_column(row, "created_at")?,
            expires_at: get_column(row, "expires_at")?,
            is_used: get_column(row, "is_used")?,
            is_revoked: get_column(row, "is_revoked")?,
        })
    }

    fn into_record(self) -> DomainResult<RefreshTokenRecord> {
        Ok(RefreshTokenRecord {
            id: parse_uuid(&self.id, "id")?,
            user_id: parse_uuid(&self.user_id, "user_id")?,
            jwt_id: parse_uuid(&self.jwt_id, "jwt_id")?,
            token_hash: self.token_hash,
            created_at: self.created_at,
            expires_at: self.expires_at,
            is_used: self.is_used,
            is_revoked: self.is_revoked,
        })
    }
}

fn get_column<'r, T>(row: &'r MySqlRow, column: &str) -> DomainResult<T>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(column)
        .map_err(|e| DomainError::store(format!("Failed to get {}: {}", column, e)))
}

fn parse_uuid(value: &str, column: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| DomainError::store(format!("Invalid UUID in {}: {}", column, e)))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

#[async_trait]
impl RefreshTokenStore for MySqlRefreshTokenStore {
    async fn insert(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, jwt_id, token_hash, created_at, expires_at, is_used, is_revoked)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(record.jwt_id.to_string())
        .bind(&record.token_hash)
        .bind(record.created_at)
        .bind(record.expires_at)
        .bind(record.is_used)
        .bind(record.is_revoked)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(e) if is_unique_violation(&e) => {
                Err(DomainError::store("Refresh token value already exists"))
            }
            Err(e) => Err(DomainError::store(format!("Failed to insert refresh token: {}", e))),
        }
    }

    async fn find_by_token_value(&self, token_value: &str) -> DomainResult<Option<RefreshTokenRecord>> {
        self.fetch_one_where("token_hash = ?", hash_token_value(token_value))
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<RefreshTokenRecord>> {
        self.fetch_one_where("id = ?", id.to_string()).await
    }

    async fn mark_used(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(MARK_USED_SQL)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to mark refresh token used: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(REVOKE_SQL)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to revoke refresh token: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize> {
        let result = sqlx::query(REVOKE_ALL_SQL)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to revoke user tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn prune_expired(&self, before: DateTime<Utc>) -> DomainResult<usize> {
        let result = sqlx::query(PRUNE_SQL)
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to delete expired tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn row_for(record: &RefreshTokenRecord) -> RefreshTokenRow {
        RefreshTokenRow {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            jwt_id: record.jwt_id.to_string(),
            token_hash: record.token_hash.clone(),
            created_at: record.created_at,
            expires_at: record.expires_at,
            is_used: record.is_used,
            is_revoked: record.is_revoked,
        }
    }

    #[test]
    fn test_row_maps_back_to_record() {
        let mut record =
            RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), "value", Duration::days(1)).unwrap();
        record.is_used = true;

        let mapped = row_for(&record).into_record().unwrap();
        assert_eq!(mapped, record);
    }

    #[test]
    fn test_row_with_corrupt_uuid_is_a_store_error() {
        let record = RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), "value", Duration::days(1)).unwrap();
        let mut row = row_for(&record);
        row.jwt_id = "garbage".to_string();

        let err = row.into_record().unwrap_err();
        assert!(matches!(err, DomainError::Store { ref message } if message.contains("jwt_id")));
    }

    #[test]
    fn test_mark_used_is_a_single_conditional_update() {
        assert!(MARK_USED_SQL.starts_with("UPDATE refresh_tokens"));
        assert!(MARK_USED_SQL.contains("is_used = FALSE"));
        assert!(MARK_USED_SQL.contains("is_revoked = FALSE"));
    }

    #[test]
    fn test_schema_indexes_the_value_digest() {
        assert!(REFRESH_TOKENS_SCHEMA.contains("token_hash CHAR(64) NOT NULL"));
        assert!(REFRESH_TOKENS_SCHEMA.contains("UNIQUE KEY uk_refresh_tokens_token_hash (token_hash)"));
        assert!(!REFRESH_TOKENS_SCHEMA.contains("token_value"));
    }
}
