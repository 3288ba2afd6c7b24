//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing key, lifetimes, issuer and audience
//! - `database` - Refresh-token store connection pool configuration
//! - `environment` - Environment detection and logging configuration
//!
//! Configuration is layered: built-in defaults, then `config/default.toml`,
//! then the per-environment file, then `TOLLGATE__*` environment variables.

pub mod auth;
pub mod database;
pub mod environment;

use std::path::Path;

use ::config::{Config, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Prefix of environment variables overriding file configuration
pub const ENV_PREFIX: &str = "TOLLGATE";

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Refresh-token store configuration
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::defaults_for(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn defaults_for(environment: Environment) -> Self {
        Self {
            environment,
            jwt: JwtConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from files and the process environment
    ///
    /// Reads a `.env` file if present, detects the environment and merges
    /// `config/default.toml`, the environment file and `TOLLGATE__*` variables
    /// (e.g. `TOLLGATE__JWT__SECRET`) over the built-in defaults. The
    /// conventional `DATABASE_URL` family is applied last.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let defaults = Config::try_from(&Self::defaults_for(environment))?;

        let mut config: AppConfig = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&environment.config_file()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.database = config.database.with_env_overrides(|key| std::env::var(key).ok());

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file on top of the built-in defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Self::default())?;

        let config: AppConfig = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_ref()).required(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-cutting constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "the development signing secret must not be used in production".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tollgate-{}-{}-{}.toml",
            name,
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let path = write_temp_config(
            "override",
            r#"
[jwt]
secret = "file-provided-secret-that-is-long-enough-0001"
access_token_ttl_seconds = 120
refresh_token_ttl_seconds = 2592000
issuer = "http://auth.example"
audience = "http://concert-meetup/api"
"#,
        );

        let config = AppConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.jwt.access_token_ttl_seconds, 120);
        assert_eq!(config.jwt.audience, "http://concert-meetup/api");
        assert_eq!(config.jwt.refresh_token_length, 32);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig::defaults_for(Environment::Production);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_rejects_invalid_jwt_section() {
        let path = write_temp_config(
            "invalid",
            r#"
[jwt]
secret = "tiny"
access_token_ttl_seconds = 300
refresh_token_ttl_seconds = 600
issuer = "tollgate"
audience = "tollgate-api"
"#,
        );

        let result = AppConfig::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
