//! Error types

mod api;
mod auth;
mod detail;
mod field;

pub use api::*;
pub use auth::*;
pub use detail::*;
pub use field::*;

/// Top-level error type unifying every layer of the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from an API call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Error from an authentication flow.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Error from typed field access on a record.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// JSON (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns the HTTP status code if this wraps an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            _ => None,
        }
    }

    /// Returns `true` if the error indicates the session must be
    /// re-established (the caller should clear stored tokens and re-login).
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Auth(AuthError::SessionExpired { .. }))
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
