//! User account as exposed by the user directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user known to the directory
///
/// Password material stays inside the directory implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,

    /// Normalised (trimmed, lowercased) email address
    pub email: String,

    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Creates a new account with a fresh identifier
    pub fn new(email: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            created_at: Utc::now(),
        }
    }
}

/// Canonical form used for lookups and uniqueness checks
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
