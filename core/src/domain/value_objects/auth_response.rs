//! Conversion of issue/refresh outcomes into the boundary envelope.

use tg_shared::errors::IntoErrorResponse;
use tg_shared::types::AuthResult;

use crate::domain::entities::TokenPair;
use crate::errors::DomainResult;

impl From<TokenPair> for AuthResult {
    fn from(pair: TokenPair) -> Self {
        AuthResult::success(pair.access_token, pair.refresh_token)
    }
}

/// Render an issue or refresh outcome as an [`AuthResult`]
pub fn to_auth_result(outcome: &DomainResult<TokenPair>) -> AuthResult {
    match outcome {
        Ok(pair) => pair.clone().into(),
        Err(error) => AuthResult::failure(error.to_error_response()),
    }
}
