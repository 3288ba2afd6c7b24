//! Credential gateway module
//!
//! Registration and login against the external user directory, plus the
//! refresh and logout entry points over the token service.

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
