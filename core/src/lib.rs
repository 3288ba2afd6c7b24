//! # Tollgate Core
//!
//! Token lifecycle for the identity service: HS512 access tokens, single-use
//! refresh tokens with atomic rotation, and a thin credential gateway over an
//! injected user directory.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
