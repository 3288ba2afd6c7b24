//! Database configuration module

use serde::{Deserialize, Serialize};

/// Database configuration for the refresh-token store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mysql://localhost:3306/tollgate"),
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
        }
    }
}

impl DatabaseConfig {
    /// Apply the conventional `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`
    /// and `DATABASE_CONNECT_TIMEOUT` variables read through `lookup`
    ///
    /// Set variables win over file and `TOLLGATE__DATABASE__*` values;
    /// unparsable numbers are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            self.url = url;
        }
        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS").and_then(|v| v.parse().ok()) {
            self.max_connections = max;
        }
        if let Some(timeout) = lookup("DATABASE_CONNECT_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.connect_timeout = timeout;
        }
        self
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}
