//! Session token caching and automatic refresh

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AccessToken;
use super::TokenProvider;
use crate::error::AuthError;

/// Trait for authentication flows that can obtain and refresh tokens.
///
/// Implement this for any way of turning credentials into an
/// [`AccessToken`]. Used with [`SessionTokenProvider`] for automatic
/// session management.
#[async_trait]
pub trait AuthFlow: Send + Sync {
    /// Authenticates from scratch and obtains a new access token.
    async fn authenticate(&self, base_url: &str) -> Result<AccessToken, AuthError>;

    /// Refreshes an access token using a refresh token.
    async fn refresh(&self, base_url: &str, refresh_token: &str) -> Result<AccessToken, AuthError>;
}

/// A token provider that caches the session token and renews it before
/// it expires.
///
/// Wraps any [`AuthFlow`] implementation:
/// - Returns the cached token while it is still valid
/// - Refreshes through the refresh token when the access token is
///   expired or about to expire
/// - Falls back to full re-authentication if the refresh is rejected
///
/// # Example
///
/// ```ignore
/// use storefront_lib::auth::{PasswordLogin, SessionTokenProvider};
/// use storefront_lib::StorefrontClient;
///
/// let login = PasswordLogin::new("admin@example.com", "password123");
/// let provider = SessionTokenProvider::new(login);
///
/// let client = StorefrontClient::builder()
///     .url("https://shop.example.com/api")
///     .token_provider(provider)
///     .build();
///
/// // Tokens are managed behind the scenes - no manual refresh needed
/// client.products().list(Default::default()).await?;
/// ```
pub struct SessionTokenProvider<F> {
    flow: F,
    token: RwLock<Option<AccessToken>>,
    /// Renew this long before actual expiry
    refresh_buffer: Duration,
}

impl<F: AuthFlow> SessionTokenProvider<F> {
    /// Creates a new session token provider.
    ///
    /// Uses a default refresh buffer of 60 seconds: with 30-minute access
    /// tokens, renewing a minute early keeps in-flight requests from
    /// racing the expiry.
    pub fn new(flow: F) -> Self {
        Self {
            flow,
            token: RwLock::new(None),
            refresh_buffer: Duration::from_secs(60),
        }
    }

    /// Creates a new session token provider with a custom refresh buffer.
    pub fn with_refresh_buffer(flow: F, refresh_buffer: Duration) -> Self {
        Self {
            flow,
            token: RwLock::new(None),
            refresh_buffer,
        }
    }

    /// Clears the cached token, forcing re-authentication on next request.
    pub async fn clear_token(&self) {
        let mut token = self.token.write().await;
        *token = None;
    }

    fn buffer(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.refresh_buffer).unwrap_or(chrono::Duration::zero())
    }
}

#[async_trait]
impl<F: AuthFlow> TokenProvider for SessionTokenProvider<F> {
    async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError> {
        // Fast path: valid cached token
        {
            let token_guard = self.token.read().await;
            if let Some(ref token) = *token_guard {
                if !token.expires_within(self.buffer()) {
                    return Ok(token.clone());
                }
            }
        }

        let mut token_guard = self.token.write().await;

        // Double-check after acquiring write lock (another task may have renewed)
        if let Some(ref token) = *token_guard {
            if !token.expires_within(self.buffer()) {
                return Ok(token.clone());
            }
        }

        let new_token = match token_guard
            .as_ref()
            .and_then(|token| token.refresh_token.clone())
        {
            Some(refresh_token) => match self.flow.refresh(base_url, &refresh_token).await {
                Ok(token) => token,
                // Refresh rejected, fall back to full authentication
                Err(_) => self.flow.authenticate(base_url).await?,
            },
            None => self.flow.authenticate(base_url).await?,
        };

        *token_guard = Some(new_token.clone());
        Ok(new_token)
    }

    async fn invalidate(&self) {
        self.clear_token().await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use chrono::Utc;

    use super::*;

    /// Flow that mints predictable tokens and counts how it was called.
    struct CountingFlow {
        authenticate_calls: AtomicUsize,
        refresh_calls: AtomicUsize,
        token_lifetime: chrono::Duration,
        refresh_fails: bool,
    }

    impl CountingFlow {
        fn new(token_lifetime: chrono::Duration) -> Self {
            Self {
                authenticate_calls: AtomicUsize::new(0),
                refresh_calls: AtomicUsize::new(0),
                token_lifetime,
                refresh_fails: false,
            }
        }

        fn with_failing_refresh(token_lifetime: chrono::Duration) -> Self {
            Self {
                refresh_fails: true,
                ..Self::new(token_lifetime)
            }
        }

        fn mint(&self, label: &str) -> AccessToken {
            AccessToken::with_refresh(
                label,
                Some(Utc::now() + self.token_lifetime),
                format!("refresh-{label}"),
            )
        }
    }

    #[async_trait]
    impl AuthFlow for CountingFlow {
        async fn authenticate(&self, _base_url: &str) -> Result<AccessToken, AuthError> {
            let n = self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.mint(&format!("auth-{n}")))
        }

        async fn refresh(
            &self,
            _base_url: &str,
            _refresh_token: &str,
        ) -> Result<AccessToken, AuthError> {
            let n = self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            if self.refresh_fails {
                return Err(AuthError::session_expired("refresh token rejected"));
            }
            Ok(self.mint(&format!("refresh-{n}")))
        }
    }

    #[tokio::test]
    async fn test_token_is_cached_between_calls() {
        let provider = SessionTokenProvider::new(CountingFlow::new(chrono::Duration::hours(1)));

        let first = provider.get_token("http://localhost").await.unwrap();
        let second = provider.get_token("http://localhost").await.unwrap();

        assert_eq!(first.access_token, second.access_token);
        assert_eq!(
            provider.flow.authenticate_calls.load(Ordering::SeqCst),
            1,
            "valid cached token should not trigger re-authentication"
        );
    }

    #[tokio::test]
    async fn test_expiring_token_is_refreshed() {
        // Lifetime shorter than the refresh buffer, so the second call renews
        let flow = CountingFlow::new(chrono::Duration::seconds(10));
        let provider = SessionTokenProvider::with_refresh_buffer(flow, Duration::from_secs(60));

        let first = provider.get_token("http://localhost").await.unwrap();
        let second = provider.get_token("http://localhost").await.unwrap();

        assert_ne!(first.access_token, second.access_token);
        assert_eq!(provider.flow.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.flow.authenticate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_falls_back_to_authenticate() {
        let flow = CountingFlow::with_failing_refresh(chrono::Duration::seconds(10));
        let provider = SessionTokenProvider::with_refresh_buffer(flow, Duration::from_secs(60));

        provider.get_token("http://localhost").await.unwrap();
        let renewed = provider.get_token("http://localhost").await.unwrap();

        assert!(renewed.access_token.starts_with("auth-"));
        assert_eq!(provider.flow.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.flow.authenticate_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_fresh_authentication() {
        let provider = SessionTokenProvider::new(CountingFlow::new(chrono::Duration::hours(1)));

        provider.get_token("http://localhost").await.unwrap();
        provider.invalidate().await;
        provider.get_token("http://localhost").await.unwrap();

        // Invalidation drops the refresh token along with the session
        assert_eq!(provider.flow.authenticate_calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.flow.refresh_calls.load(Ordering::SeqCst), 0);
    }
}
