//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - The MySQL refresh token store with a conditional single-use update
//! - Schema bootstrap for the `refresh_tokens` table

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlRefreshTokenStore, REFRESH_TOKENS_SCHEMA};
