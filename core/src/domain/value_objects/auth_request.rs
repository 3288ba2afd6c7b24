//! Request value objects accepted by the credential gateway.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::ValidationError;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Registration request: creates a user and issues a first token pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks presence first, then shape; the first failure is reported
    pub fn check(&self) -> Result<(), ValidationError> {
        require("email", &self.email)?;
        require("password", &self.password)?;

        if let Err(errors) = self.validate() {
            let fields = errors.field_errors();
            if fields.contains_key("email") {
                return Err(ValidationError::InvalidEmail);
            }
            if fields.contains_key("password") {
                return Err(ValidationError::PasswordTooShort {
                    min: MIN_PASSWORD_LENGTH,
                });
            }
        }
        Ok(())
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn check(&self) -> Result<(), ValidationError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

/// Refresh request: the (possibly expired) access token and its refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub token: String,
    pub refresh_token: String,
}

impl TokenRequest {
    pub fn new(token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    pub fn check(&self) -> Result<(), ValidationError> {
        require("token", &self.token)?;
        require("refresh_token", &self.refresh_token)
    }
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    Ok(())
}
