//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] midnight_dream_core::EmailError),

    /// Login attempted without a password.
    #[error("enter your password")]
    MissingPassword,

    /// Registration with one or more blank fields.
    #[error("fill in all fields")]
    MissingFields,

    /// Password shorter than the minimum length.
    #[error("password must be at least 6 characters")]
    WeakPassword,

    /// The simulated auth backend rejected the request.
    #[error("{0}")]
    Backend(String),
}
