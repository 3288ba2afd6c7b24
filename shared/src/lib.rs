//! Shared utilities and common types for the Tollgate token service
//!
//! This crate provides common functionality used across all workspace members:
//! - Configuration types and layered loading
//! - Logging bootstrap
//! - Error codes and boundary response structures

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use logging::{init_tracing, LoggingError};
pub use types::AuthResult;
