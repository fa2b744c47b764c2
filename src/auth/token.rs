//! Access tokens and the provider trait the client pulls them from

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// A bearer token issued by the storefront's `/auth` endpoints.
///
/// Holds the access token sent with every API call, along with the
/// expiration metadata and refresh token needed to renew the session
/// without prompting for credentials again. Access tokens are
/// short-lived (30 minutes by default); refresh tokens last days.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The raw bearer token string.
    pub access_token: String,
    /// Expiry instant, when the service reported one.
    pub expires_at: Option<DateTime<Utc>>,
    /// Token exchanged for a fresh access token when this one lapses.
    pub refresh_token: Option<String>,
}

impl AccessToken {
    /// Wraps a bare token string with no expiry or refresh metadata.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
            refresh_token: None,
        }
    }

    /// Wraps a token that is known to expire at `expires_at`.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
            refresh_token: None,
        }
    }

    /// Wraps a token together with its refresh token.
    pub fn with_refresh(
        access_token: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Whether the expiry instant has passed.
    ///
    /// Tokens without a known expiry never count as expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Whether the token will lapse within `duration` from now.
    ///
    /// Tokens without a known expiry never count as expiring.
    pub fn expires_within(&self, duration: chrono::Duration) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now() + duration >= exp)
    }

    /// Whether a refresh token accompanies this access token.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Formats the token for an `Authorization` header.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Trait for providing access tokens to the storefront client.
///
/// An implementation decides where tokens come from (logging in, reading a
/// stored session, a hardcoded string) and how long to hold onto them
/// before re-authenticating.
///
/// The client calls `get_token` before each API request, and calls
/// `invalidate` when the service rejects a token with 401 so the next
/// request starts from a clean slate.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use storefront_lib::auth::{TokenProvider, AccessToken};
/// use storefront_lib::error::AuthError;
///
/// struct KeyringTokenProvider {
///     token: tokio::sync::RwLock<Option<AccessToken>>,
/// }
///
/// #[async_trait]
/// impl TokenProvider for KeyringTokenProvider {
///     async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError> {
///         // Return cached token if valid, otherwise refresh or re-authenticate
///         todo!("read the keyring entry")
///     }
/// }
/// ```
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Produces an access token for the service at `base_url`.
    ///
    /// Expected behavior: hand back a cached token while it is still valid,
    /// refresh it when expired but refreshable, and fall back to a full
    /// re-authentication otherwise.
    async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError>;

    /// Discards any cached token so the next `get_token` starts fresh.
    ///
    /// Called by the client after the service answers 401 for a token it
    /// previously accepted. The default implementation does nothing, which
    /// is correct for providers that hold no mutable state.
    async fn invalidate(&self) {}
}

/// A token provider that hands out one fixed token forever.
///
/// Useful for testing or for scripts holding a long-lived token that
/// doesn't need refresh logic.
///
/// # Example
///
/// ```
/// use storefront_lib::auth::{StaticTokenProvider, AccessToken};
///
/// let provider = StaticTokenProvider::new("my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Builds a provider around a bare token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }

    /// Builds a provider around an already-constructed [`AccessToken`].
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _base_url: &str) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }
}
