//! Access token encoding and validation with a pinned algorithm

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::token::{AccessTokenClaims, Claims};
use crate::errors::TokenError;

use super::key_manager::SigningKeyProvider;

/// Decode switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Accept tokens past their `exp` (rotation decodes expired tokens)
    pub ignore_expiry: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn ignoring_expiry() -> Self {
        Self { ignore_expiry: true }
    }
}

/// A verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub claims: AccessTokenClaims,
    pub token_id: Uuid,
    pub algorithm: Algorithm,
    pub expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Encodes and decodes access tokens
///
/// The header algorithm is checked against the pinned algorithm before any
/// signature work, so a token declaring another algorithm fails with
/// `AlgorithmMismatch` even if its signature would verify.
#[derive(Debug, Clone)]
pub struct AccessTokenCodec {
    keys: Arc<SigningKeyProvider>,
    issuer: String,
    audience: String,
}

impl AccessTokenCodec {
    pub fn new(keys: Arc<SigningKeyProvider>, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// Sign `claims` into a token expiring `ttl` after `claims.issued_at`
    pub fn encode(&self, claims: &AccessTokenClaims, ttl: Duration) -> Result<String, TokenError> {
        let wire = Claims::from_access_claims(claims, ttl, &self.issuer, &self.audience)?;
        encode(&Header::new(self.keys.algorithm()), &wire, self.keys.encoding_key())
            .map_err(|_| TokenError::TokenGenerationFailed)
    }

    /// Verify and decode a token
    ///
    /// # Errors
    /// * `MalformedToken` - not a three-part token, or undecodable header or claims
    /// * `AlgorithmMismatch` - header declares anything other than HS512
    /// * `SignatureInvalid` - signature does not verify with the pinned key
    /// * `InvalidClaims` - wrong issuer or audience, not yet valid, missing claims
    /// * `TokenExpired` - past `exp`, unless `options.ignore_expiry`
    pub fn decode(&self, token: &str, options: DecodeOptions) -> Result<DecodedToken, TokenError> {
        let declared = declared_algorithm(token)?;
        let pinned = self.keys.algorithm();
        if !declared.eq_ignore_ascii_case(SigningKeyProvider::ALGORITHM_NAME) {
            return Err(TokenError::AlgorithmMismatch { algorithm: declared });
        }

        let mut validation = Validation::new(pinned);
        validation.leeway = 0;
        validation.validate_exp = !options.ignore_expiry;
        validation.validate_nbf = true;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);

        let data = decode::<Claims>(token, self.keys.decoding_key(), &validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                JwtErrorKind::ExpiredSignature => TokenError::TokenExpired,
                JwtErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch {
                    algorithm: declared.clone(),
                },
                JwtErrorKind::InvalidAudience
                | JwtErrorKind::InvalidIssuer
                | JwtErrorKind::InvalidSubject
                | JwtErrorKind::ImmatureSignature
                | JwtErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                _ => TokenError::MalformedToken,
            }
        })?;

        // `exp` is exclusive: a token is expired from that second on
        if !options.ignore_expiry && data.claims.is_expired_at(Utc::now()) {
            return Err(TokenError::TokenExpired);
        }

        let expires_at = Self::expires_at(&data.claims).ok_or(TokenError::InvalidClaims)?;
        let claims = data.claims.to_access_claims().ok_or(TokenError::InvalidClaims)?;

        Ok(DecodedToken {
            token_id: claims.token_id,
            claims,
            algorithm: data.header.alg,
            expires_at,
        })
    }

    /// Expiry of wire claims as a timestamp
    pub fn expires_at(claims: &Claims) -> Option<DateTime<Utc>> {
        claims.expires_at()
    }
}

fn declared_algorithm(token: &str) -> Result<String, TokenError> {
    let mut segments = token.split('.');
    let header = segments.next().ok_or(TokenError::MalformedToken)?;
    if segments.count() != 2 {
        return Err(TokenError::MalformedToken);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::MalformedToken)?;
    let header: RawHeader = serde_json::from_slice(&bytes).map_err(|_| TokenError::MalformedToken)?;
    Ok(header.alg)
}
