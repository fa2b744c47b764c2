//! Response wrapper with request metadata

use std::time::Duration;

/// A response from the storefront client with transport metadata attached.
///
/// Fetch operations (list and get calls) return this wrapper so callers can
/// see how long the request took end to end and whether the client had to
/// retry to get it.
///
/// # Example
///
/// ```ignore
/// let response = client.products().list(ProductQuery::new()).await?;
///
/// if response.meta().retries > 0 {
///     println!("Succeeded after {} retries", response.meta().retries);
/// }
///
/// let page = response.into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    data: T,
    /// Transport metadata for this response.
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    /// Creates a new response wrapper.
    pub fn new(data: T, meta: ResponseMeta) -> Self {
        Self { data, meta }
    }

    /// Returns a reference to the inner data.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns the transport metadata.
    pub fn meta(&self) -> &ResponseMeta {
        &self.meta
    }

    /// Consumes the response and returns the inner data.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Maps the inner data using the provided function.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            meta: self.meta,
        }
    }
}

/// Transport metadata recorded while a request executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponseMeta {
    /// Wall-clock time spent on the request, including retries.
    pub duration: Duration,
    /// Number of retries before the response arrived (0 = first try).
    pub retries: u32,
}

impl ResponseMeta {
    /// Creates metadata from the recorded duration and retry count.
    pub fn new(duration: Duration, retries: u32) -> Self {
        Self { duration, retries }
    }

    /// Returns `true` if the request succeeded without retrying.
    pub fn first_try(&self) -> bool {
        self.retries == 0
    }
}
