//! Email/password login against the storefront's own auth endpoints

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::session::AuthFlow;
use super::AccessToken;
use crate::error::AuthError;
use crate::error::ErrorDetail;

/// Credential login flow.
///
/// Posts the email and password to `/auth/login` and exchanges refresh
/// tokens at `/auth/refresh`. The service issues its own JWTs, so unlike
/// an OAuth2 provider there is no separate authority to talk to.
///
/// # Example
///
/// ```ignore
/// use storefront_lib::auth::PasswordLogin;
///
/// let login = PasswordLogin::new("admin@example.com", "password123");
/// let token = login.authenticate("https://shop.example.com/api").await?;
/// ```
#[derive(Clone)]
pub struct PasswordLogin {
    email: String,
    password: String,
    http_client: reqwest::Client,
}

impl PasswordLogin {
    /// Creates a new login flow with the given credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Authenticates with email and password.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The service root (e.g., `https://shop.example.com/api`)
    ///
    /// # Returns
    ///
    /// An access token with expiry metadata and a refresh token.
    pub async fn authenticate(&self, base_url: &str) -> Result<AccessToken, AuthError> {
        let url = format!("{}/auth/login", base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .json(&json!({
                "email": self.email,
                "password": self.password,
            }))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        handle_token_response(response).await
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The service takes the refresh token as a query parameter, not a
    /// request body. A 401 here means the refresh token itself expired
    /// and the session is over.
    pub async fn refresh(
        &self,
        base_url: &str,
        refresh_token: &str,
    ) -> Result<AccessToken, AuthError> {
        let url = format!("{}/auth/refresh", base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .query(&[("refresh_token", refresh_token)])
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AuthError::session_expired("refresh token rejected"));
        }
        handle_token_response(response).await
    }
}

impl std::fmt::Debug for PasswordLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordLogin")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

async fn handle_token_response(response: reqwest::Response) -> Result<AccessToken, AuthError> {
    let status = response.status();
    if status.is_success() {
        let grant: TokenGrant = response.json().await?;
        Ok(grant.into_access_token())
    } else {
        let body = response.text().await.unwrap_or_default();
        let message = ErrorDetail::from_body(&body)
            .map(|detail| detail.message())
            .unwrap_or_else(|| status.to_string());
        Err(AuthError::Parse(message))
    }
}

/// Token payload from `/auth/login` and `/auth/refresh`.
///
/// The service also returns `token_type` and the authenticated `user`;
/// callers who want the profile fetch it through the API surface instead.
#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl TokenGrant {
    fn into_access_token(self) -> AccessToken {
        let expires_at = self.expires_in.map(|secs| Utc::now() + Duration::seconds(secs));

        match self.refresh_token {
            Some(refresh) => AccessToken::with_refresh(self.access_token, expires_at, refresh),
            None => match expires_at {
                Some(exp) => AccessToken::with_expiry(self.access_token, exp),
                None => AccessToken::new(self.access_token),
            },
        }
    }
}

#[async_trait]
impl AuthFlow for PasswordLogin {
    async fn authenticate(&self, base_url: &str) -> Result<AccessToken, AuthError> {
        self.authenticate(base_url).await
    }

    async fn refresh(&self, base_url: &str, refresh_token: &str) -> Result<AccessToken, AuthError> {
        self.refresh(base_url, refresh_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_grant_with_refresh() {
        let grant: TokenGrant = serde_json::from_str(
            r#"{
                "access_token": "abc123",
                "token_type": "bearer",
                "expires_in": 1800,
                "refresh_token": "def456",
                "user": {"id": 1, "email": "admin@example.com"}
            }"#,
        )
        .unwrap();

        let token = grant.into_access_token();
        assert_eq!(token.access_token, "abc123");
        assert_eq!(token.refresh_token.as_deref(), Some("def456"));
        assert!(token.expires_at.is_some());
        assert!(!token.is_expired());
        assert!(token.can_refresh());
    }

    #[test]
    fn test_token_grant_minimal() {
        let grant: TokenGrant = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        let token = grant.into_access_token();
        assert_eq!(token.access_token, "abc");
        assert!(token.expires_at.is_none());
        assert!(!token.can_refresh());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_debug_redacts_password() {
        let login = PasswordLogin::new("admin@example.com", "hunter2");
        let debug = format!("{:?}", login);
        assert!(debug.contains("admin@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
