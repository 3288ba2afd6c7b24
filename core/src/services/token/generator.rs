//! Opaque refresh token value generation

use rand::Rng;

/// Symbols a refresh token value is drawn from
pub const REFRESH_TOKEN_ALPHABET: &[u8; 63] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_";

/// Generates unguessable refresh token values
///
/// Draws from `thread_rng`, a ChaCha CSPRNG seeded from the OS.
#[derive(Debug, Clone)]
pub struct RefreshTokenGenerator {
    length: usize,
}

impl RefreshTokenGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| REFRESH_TOKEN_ALPHABET[rng.gen_range(0..REFRESH_TOKEN_ALPHABET.len())] as char)
            .collect()
    }
}
