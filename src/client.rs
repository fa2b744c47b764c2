//! Main StorefrontClient

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;
use crate::response::ResponseMeta;

/// The main client for the storefront REST API.
///
/// Cloning is cheap (the guts live behind an `Arc`), so one client can be
/// shared across tasks freely. Authenticated requests go through the configured
/// [`TokenProvider`]; transient failures are retried per [`RetryConfig`].
///
/// # Example
///
/// ```ignore
/// use storefront_lib::{StorefrontClient, auth::StaticTokenProvider};
///
/// let provider = StaticTokenProvider::new("my-token");
/// let client = StorefrontClient::builder()
///     .url("https://shop.example.com/api")
///     .token_provider(provider)
///     .build();
///
/// client.connect().await?;
/// ```
#[derive(Clone)]
pub struct StorefrontClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl StorefrontClient {
    /// Starts a builder for configuring a client.
    pub fn builder() -> StorefrontClientBuilder<Missing, Missing> {
        StorefrontClientBuilder::new()
    }

    /// Validates connectivity to the service.
    ///
    /// Hits the unauthenticated `/health` endpoint, so this succeeds or
    /// fails on reachability alone. Credentials are exercised lazily by
    /// the first real API call.
    pub async fn connect(&self) -> Result<HealthCheck, Error> {
        let url = self.build_url("/health");

        let response = self
            .inner
            .http_client
            .get(&url)
            .timeout(self.inner.timeout)
            .send()
            .await
            .map_err(|e| Error::Api(self.map_send_error(e)))?;

        let status = response.status();
        if status.is_success() {
            let health: HealthCheck = response.json().await.map_err(ApiError::from)?;
            Ok(health)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api(ApiError::from_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or("HTTP error"),
                &body,
            )))
        }
    }

    /// Returns the base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    pub(crate) fn build_url(&self, path_and_query: &str) -> String {
        format!(
            "{}{}",
            self.inner.base_url.trim_end_matches('/'),
            path_and_query
        )
    }

    /// Makes an authenticated HTTP request with retry logic.
    ///
    /// Every API operation funnels through this method. It handles three
    /// recovery cases before giving up:
    /// - 401: invalidate the cached token and retry once with a fresh one
    /// - 429: wait out Retry-After (or backoff) and retry
    /// - 5xx / network / timeout: retry with exponential backoff
    pub(crate) async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<String>,
    ) -> Result<(reqwest::Response, ResponseMeta), Error> {
        let url = self.build_url(path_and_query);
        let retry_config = &self.inner.retry_config;

        let started = Instant::now();
        let mut attempts = 0;
        let mut retries = 0;
        let mut reauthenticated = false;
        let mut delay = retry_config.initial_delay;

        loop {
            log::debug!("{} {}", method, url);

            let result = self
                .send_request_inner(method.clone(), &url, body.clone())
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();

                    // 401: the token was rejected. Drop it and retry once with
                    // a fresh one; a second rejection means the session is gone.
                    if status == StatusCode::UNAUTHORIZED {
                        if !reauthenticated {
                            log::warn!("{} {} returned 401, re-authenticating", method, url);
                            self.inner.token_provider.invalidate().await;
                            reauthenticated = true;
                            retries += 1;
                            continue;
                        }
                        let body = response.text().await.unwrap_or_default();
                        let message = crate::error::ErrorDetail::from_body(&body)
                            .map(|detail| detail.message())
                            .filter(|m| !m.is_empty())
                            .unwrap_or_else(|| "session expired".to_string());
                        return Err(Error::Auth(AuthError::session_expired(message)));
                    }

                    // 429: honor Retry-After when the service sends one
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts >= retry_config.max_retries {
                            return Err(self.error_from(response).await);
                        }
                        let wait = parse_retry_after(&response).unwrap_or(delay);
                        log::warn!("{} {} rate limited, waiting {:?}", method, url, wait);
                        tokio::time::sleep(wait).await;
                        attempts += 1;
                        retries += 1;
                        continue;
                    }

                    if status.is_server_error() {
                        if attempts >= retry_config.max_retries {
                            return Err(self.error_from(response).await);
                        }
                        log::warn!(
                            "{} {} returned {}, retrying in {:?}",
                            method,
                            url,
                            status,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        delay = (delay * 2).min(retry_config.max_delay);
                        attempts += 1;
                        retries += 1;
                        continue;
                    }

                    if status.is_success() {
                        let meta = ResponseMeta::new(started.elapsed(), retries);
                        return Ok((response, meta));
                    }

                    // Remaining 4xx: not recoverable
                    return Err(self.error_from(response).await);
                }
                Err(e) => {
                    let retryable = match &e {
                        Error::Api(api) => api.is_retryable(),
                        _ => false,
                    };
                    if retryable && attempts < retry_config.max_retries {
                        log::warn!("{} {} failed ({}), retrying in {:?}", method, url, e, delay);
                        tokio::time::sleep(delay).await;
                        delay = (delay * 2).min(retry_config.max_delay);
                        attempts += 1;
                        retries += 1;
                        continue;
                    }
                    return Err(e);
                }
            }
        }
    }

    /// A single request attempt, no recovery.
    async fn send_request_inner(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        let token = self
            .inner
            .token_provider
            .get_token(&self.inner.base_url)
            .await?;

        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .bearer_auth(&token.access_token)
            .timeout(self.inner.timeout);

        if let Some(body) = body {
            request = request.body(body);
        }

        request
            .send()
            .await
            .map_err(|e| Error::Api(self.map_send_error(e)))
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.inner.timeout)
        } else {
            ApiError::Network(e)
        }
    }

    /// Turns a non-success response into an error, draining the body for
    /// the envelope message.
    async fn error_from(&self, response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Error::Api(ApiError::from_response(
            status.as_u16(),
            status.canonical_reason().unwrap_or("HTTP error"),
            &body,
        ))
    }
}

/// Reads a seconds-valued Retry-After header.
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Response from the `/health` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthCheck {
    /// Reported service status, `"healthy"` when all is well.
    pub status: String,
    /// Human-readable service name.
    pub service: String,
    /// Deployed service version.
    pub version: String,
    /// Backing database engine, when reported.
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthCheck {
    /// Returns `true` if the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Retry policy for transient failures.
///
/// Controls how the client handles transient failures: rate limiting
/// (429), server errors (5xx), network errors and timeouts. 401 is
/// handled separately through token invalidation and is not affected
/// by this config.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use storefront_lib::RetryConfig;
///
/// let config = RetryConfig::default()
///     .max_retries(5)
///     .initial_delay(Duration::from_millis(500));
///
/// let no_retry = RetryConfig::no_retry();
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts per request.
    pub max_retries: u32,
    /// First backoff delay; doubles on each subsequent retry.
    pub initial_delay: Duration,
    /// Ceiling the doubling backoff never exceeds.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Creates a config with retries disabled.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Caps how many times a request is retried.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Overrides the first backoff delay.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Overrides the backoff ceiling.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }
}

// =============================================================================
// Client builder
// =============================================================================

/// Marker for a builder field that has not been supplied yet.
pub struct Missing;

/// Marker wrapping a supplied builder field.
pub struct Set<T>(T);

/// Builder for constructing a [`StorefrontClient`].
///
/// Required fields are tracked in the type parameters, so forgetting one
/// is a compile error rather than a runtime panic.
///
/// # Required Fields
///
/// - `url` - The service root URL
/// - `token_provider` - how the client obtains bearer tokens
///
/// # Example
///
/// ```ignore
/// let client = StorefrontClient::builder()
///     .url("https://shop.example.com/api")
///     .token_provider(my_provider)
///     .timeout(Duration::from_secs(10))
///     .build();
/// ```
pub struct StorefrontClientBuilder<Url, Provider> {
    url: Url,
    token_provider: Provider,
    timeout: Duration,
    connect_timeout: Duration,
    retry_config: RetryConfig,
    http_client: Option<Client>,
}

impl StorefrontClientBuilder<Missing, Missing> {
    /// Starts an empty builder with default timeouts.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry_config: RetryConfig::default(),
            http_client: None,
        }
    }
}

impl Default for StorefrontClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> StorefrontClientBuilder<Missing, P> {
    /// Sets the service root URL.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .url("https://shop.example.com/api")
    /// ```
    pub fn url(self, url: impl Into<String>) -> StorefrontClientBuilder<Set<String>, P> {
        StorefrontClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            http_client: self.http_client,
        }
    }
}

impl<U> StorefrontClientBuilder<U, Missing> {
    /// Supplies the token source used to authenticate requests.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> StorefrontClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        StorefrontClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            http_client: self.http_client,
        }
    }
}

impl<U, P> StorefrontClientBuilder<U, P> {
    /// Sets the per-request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the TCP connect timeout.
    ///
    /// Defaults to 10 seconds. Applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the retry behavior for transient failures.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Supplies a pre-built reqwest client.
    ///
    /// When omitted, `build` constructs one with the configured connect
    /// timeout.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl StorefrontClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`StorefrontClient`].
    ///
    /// Only callable once both `url` and `token_provider` are set.
    pub fn build(self) -> StorefrontClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            Client::builder()
                .connect_timeout(self.connect_timeout)
                .build()
                .expect("Failed to build HTTP client")
        });

        StorefrontClient {
            inner: Arc::new(ClientInner {
                base_url: self.url.0,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        }
    }
}
