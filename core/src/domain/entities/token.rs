//! Token entities for access/refresh token issuance and rotation.

use chrono::{DateTime, Duration, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::TokenError;

/// Identity claims carried by an access token
///
/// `issued_at` is kept at whole-second precision, the resolution of the
/// encoded `iat` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenClaims {
    pub subject_id: Uuid,
    pub email: String,
    pub token_id: Uuid,
    pub issued_at: DateTime<Utc>,
}

impl AccessTokenClaims {
    /// Claims for a fresh issuance: new token id, issued now
    pub fn new(subject_id: Uuid, email: impl Into<String>) -> Self {
        Self::issued_at(subject_id, email, Utc::now())
    }

    pub fn issued_at(subject_id: Uuid, email: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            subject_id,
            email: email.into(),
            token_id: Uuid::new_v4(),
            issued_at: issued_at.trunc_subsecs(0),
        }
    }
}

/// Registered and private claims as they appear in the encoded token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    /// JWT ID, binds the token to its refresh record
    pub jti: String,

    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    /// Build wire claims expiring `ttl` after issuance
    ///
    /// Fails with `TokenGenerationFailed` when the expiry is out of range.
    pub fn from_access_claims(
        claims: &AccessTokenClaims,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Result<Self, TokenError> {
        let iat = claims.issued_at.timestamp();
        let expires_at = claims
            .issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::TokenGenerationFailed)?;
        Ok(Self {
            sub: claims.subject_id.to_string(),
            email: claims.email.clone(),
            jti: claims.token_id.to_string(),
            iat,
            nbf: iat,
            exp: expires_at.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        })
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn token_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.jti)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Convert back to domain claims; `None` if an identifier or timestamp is invalid
    pub fn to_access_claims(&self) -> Option<AccessTokenClaims> {
        Some(AccessTokenClaims {
            subject_id: self.user_id().ok()?,
            email: self.email.clone(),
            token_id: self.token_id().ok()?,
            issued_at: Utc.timestamp_opt(self.iat, 0).single()?,
        })
    }
}

/// Derived lifecycle state of a refresh record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenState {
    Active,
    Used,
    Revoked,
    Expired,
}

impl RefreshTokenState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RefreshTokenState::Active)
    }
}

/// Stored refresh token record
///
/// The bearer value itself is never stored, only its SHA-256 digest.
/// `is_used` and `is_revoked` only ever move from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    pub id: Uuid,

    pub user_id: Uuid,

    /// Token id of the access token issued alongside
    pub jwt_id: Uuid,

    /// Hex SHA-256 digest of the bearer value
    pub token_hash: String,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    pub is_used: bool,

    pub is_revoked: bool,
}

impl RefreshTokenRecord {
    /// Creates an active record for `token_value` living `ttl` from now
    ///
    /// Fails with `TokenGenerationFailed` when the expiry is out of range.
    pub fn new(user_id: Uuid, jwt_id: Uuid, token_value: &str, ttl: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(TokenError::TokenGenerationFailed)?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            jwt_id,
            token_hash: hash_token_value(token_value),
            created_at: now,
            expires_at,
            is_used: false,
            is_revoked: false,
        })
    }

    pub fn matches_value(&self, token_value: &str) -> bool {
        self.token_hash == hash_token_value(token_value)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Lifecycle state at `now`; stored flags win over expiry
    pub fn state_at(&self, now: DateTime<Utc>) -> RefreshTokenState {
        if self.is_revoked {
            RefreshTokenState::Revoked
        } else if self.is_used {
            RefreshTokenState::Used
        } else if self.is_expired_at(now) {
            RefreshTokenState::Expired
        } else {
            RefreshTokenState::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.state_at(Utc::now()) == RefreshTokenState::Active
    }
}

/// Hashes a refresh token value for storage and lookup
pub fn hash_token_value(token_value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token_value.as_bytes());
    hex::encode(hasher.finalize())
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Opaque single-use refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_ttl.num_seconds(),
            refresh_expires_in: refresh_ttl.num_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims_truncate_to_seconds() {
        let claims = AccessTokenClaims::new(Uuid::new_v4(), "fan@example.com");
        assert_eq!(claims.issued_at.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_wire_claims_conversion() {
        let access = AccessTokenClaims::new(Uuid::new_v4(), "fan@example.com");
        let wire = Claims::from_access_claims(&access, Duration::minutes(5), "tollgate", "tollgate-api").unwrap();

        assert_eq!(wire.exp - wire.iat, 300);
        assert_eq!(wire.nbf, wire.iat);
        assert_eq!(wire.expires_at(), Some(access.issued_at + Duration::minutes(5)));
        assert_eq!(wire.to_access_claims(), Some(access));
    }

    #[test]
    fn test_wire_claims_with_bad_identifiers() {
        let access = AccessTokenClaims::new(Uuid::new_v4(), "fan@example.com");
        let mut wire = Claims::from_access_claims(&access, Duration::minutes(5), "iss", "aud").unwrap();
        wire.jti = "not-a-uuid".to_string();

        assert!(wire.to_access_claims().is_none());
    }

    #[test]
    fn test_wire_claims_expiry() {
        let access = AccessTokenClaims::new(Uuid::new_v4(), "fan@example.com");
        let wire = Claims::from_access_claims(&access, Duration::zero(), "iss", "aud").unwrap();
        assert!(wire.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_refresh_record_creation() {
        let user_id = Uuid::new_v4();
        let jwt_id = Uuid::new_v4();
        let record = RefreshTokenRecord::new(user_id, jwt_id, "opaque_value", Duration::days(180)).unwrap();

        assert_eq!(record.user_id, user_id);
        assert_eq!(record.jwt_id, jwt_id);
        assert_ne!(record.token_hash, "opaque_value");
        assert!(record.matches_value("opaque_value"));
        assert!(!record.matches_value("opaque_valuf"));
        assert!(record.is_active());
        assert_eq!(record.expires_at - record.created_at, Duration::days(180));
    }

    #[test]
    fn test_refresh_record_states() {
        let now = Utc::now();
        let mut record = RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), "v", Duration::days(1)).unwrap();
        assert_eq!(record.state_at(now), RefreshTokenState::Active);
        assert!(!record.state_at(now).is_terminal());

        assert_eq!(record.state_at(now + Duration::days(2)), RefreshTokenState::Expired);

        record.is_used = true;
        assert_eq!(record.state_at(now), RefreshTokenState::Used);

        record.is_revoked = true;
        assert_eq!(record.state_at(now), RefreshTokenState::Revoked);
        assert!(record.state_at(now).is_terminal());
    }

    #[test]
    fn test_out_of_range_lifetimes_are_errors() {
        let access = AccessTokenClaims::new(Uuid::new_v4(), "fan@example.com");
        assert_eq!(
            Claims::from_access_claims(&access, Duration::max_value(), "iss", "aud"),
            Err(TokenError::TokenGenerationFailed)
        );
        assert_eq!(
            RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), "v", Duration::max_value()),
            Err(TokenError::TokenGenerationFailed)
        );
    }

    #[test]
    fn test_hash_is_stable_hex() {
        let hash = hash_token_value("abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token_value("abc"));
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_token_pair_lifetimes() {
        let pair = TokenPair::new(
            "access".to_string(),
            "refresh".to_string(),
            Duration::minutes(5),
            Duration::days(180),
        );

        assert_eq!(pair.access_expires_in, 300);
        assert_eq!(pair.refresh_expires_in, 15_552_000);
    }
}
