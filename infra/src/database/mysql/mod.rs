//! MySQL implementations of the core storage traits

mod refresh_token_store_impl;

pub use refresh_token_store_impl::{MySqlRefreshTokenStore, REFRESH_TOKENS_SCHEMA};
