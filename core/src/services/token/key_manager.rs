//! HS512 signing key provider

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use tg_shared::config::JwtConfig;

/// Process-wide symmetric key pair used to sign and verify access tokens
///
/// Built once at startup and shared behind an `Arc`; never mutated.
#[derive(Clone)]
pub struct SigningKeyProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SigningKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyProvider")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

impl SigningKeyProvider {
    /// Pinned signing algorithm
    pub const ALGORITHM: Algorithm = Algorithm::HS512;

    /// Header `alg` value of the pinned algorithm
    pub const ALGORITHM_NAME: &'static str = "HS512";

    /// Creates a provider from raw key material
    ///
    /// # Example
    ///
    /// ```
    /// use tg_core::services::token::SigningKeyProvider;
    ///
    /// let keys = SigningKeyProvider::from_secret(b"a-sufficiently-long-shared-secret-value");
    /// assert_eq!(keys.algorithm(), jsonwebtoken::Algorithm::HS512);
    /// ```
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::from_secret(config.secret.as_bytes())
    }

    pub fn algorithm(&self) -> Algorithm {
        Self::ALGORITHM
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
