//! Token service module
//!
//! This module handles all token-related operations including:
//! - HS512 access token encoding and pinned-algorithm validation
//! - Refresh token generation, issuance and single-use rotation
//! - Revocation and pruning of refresh records

mod cleanup;
mod codec;
mod config;
mod generator;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService, MAX_GRACE_PERIOD_DAYS};
pub use codec::{AccessTokenCodec, DecodeOptions, DecodedToken};
pub use config::TokenServiceConfig;
pub use generator::{RefreshTokenGenerator, REFRESH_TOKEN_ALPHABET};
pub use key_manager::SigningKeyProvider;
pub use service::TokenService;
