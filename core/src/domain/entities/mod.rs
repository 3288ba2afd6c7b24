//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    hash_token_value, AccessTokenClaims, Claims, RefreshTokenRecord, RefreshTokenState, TokenPair,
};
pub use user::{normalize_email, UserAccount};
