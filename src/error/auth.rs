//! Errors from login and token refresh

/// Failures surfaced by the login and refresh flows.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The service rejected the email/password pair.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Access token expired and the refresh attempt was rejected.
    ///
    /// The surrounding application should clear its stored session and send
    /// the user back to the login screen.
    #[error("Session expired: {message}")]
    SessionExpired {
        /// Why the session could not be renewed.
        message: String,
    },

    /// The auth request never completed at the transport level.
    #[error("Transport error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// The auth response body did not match the expected shape.
    #[error("Could not parse auth response: {0}")]
    Parse(String),
}

impl AuthError {
    /// Builds an [`AuthError::SessionExpired`] with the given reason.
    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::SessionExpired {
            message: message.into(),
        }
    }
}
