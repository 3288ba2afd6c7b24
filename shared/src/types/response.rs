//! Response envelope for issue and refresh requests

use serde::{Deserialize, Serialize};

use crate::errors::ErrorResponse;

/// Envelope answering both issue and refresh requests
///
/// On success both tokens are present and `errors` is empty. On failure the
/// tokens are absent and `kind` names the stable error kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
    pub result: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub errors: Vec<String>,
}

impl AuthResult {
    pub fn success(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            result: true,
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
            kind: None,
            errors: Vec::new(),
        }
    }

    pub fn failure(error: ErrorResponse) -> Self {
        Self {
            result: false,
            access_token: None,
            refresh_token: None,
            kind: Some(error.kind),
            errors: error.errors,
        }
    }
}

impl From<ErrorResponse> for AuthResult {
    fn from(error: ErrorResponse) -> Self {
        Self::failure(error)
    }
}
