//! Deployment stage and log output settings

use serde::{Deserialize, Serialize};

/// Variables consulted, in order, to pick the deployment stage
pub const ENVIRONMENT_VARIABLES: [&str; 3] = ["TOLLGATE_ENV", "ENVIRONMENT", "RUST_ENV"];

/// Deployment stage; selects the layered config file and logging defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// Stage named by the first set variable in [`ENVIRONMENT_VARIABLES`]
    ///
    /// Unset or unrecognised values fall back to `Development`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ENVIRONMENT_VARIABLES
            .iter()
            .find_map(|key| lookup(key))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Stage-specific config file, without extension
    pub fn config_file(&self) -> String {
        format!("config/{}", self.as_str())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stage = match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "staging" | "stage" | "test" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            other => return Err(format!("unknown deployment stage '{}'", other)),
        };
        Ok(stage)
    }
}

/// Subscriber output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

/// Settings consumed by [`init_tracing`](crate::logging::init_tracing)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `tg_core=debug,sqlx=warn`
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Attach file and line to every event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::default(),
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Verbose, human-readable output locally; JSON at `info` once deployed
    ///
    /// Deployed stages stay at `info` so issuance and rotation events are kept.
    pub fn for_environment(stage: Environment) -> Self {
        match stage {
            Environment::Development => Self {
                level: String::from("debug"),
                format: LogFormat::Pretty,
                source_location: true,
            },
            Environment::Staging | Environment::Production => Self {
                level: String::from("info"),
                format: LogFormat::Json,
                source_location: false,
            },
        }
    }
}
