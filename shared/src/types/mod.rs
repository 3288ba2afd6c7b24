//! Boundary types returned by the issue and refresh operations

pub mod response;

pub use response::AuthResult;
