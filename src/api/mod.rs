//! REST API operations
//!
//! Typed access to the storefront's route groups. Each group hangs off
//! [`StorefrontClient`] as a cheap borrowed handle:
//!
//! ```ignore
//! let page = client.products().list(ProductQuery::new().limit(50)).await?;
//! let stats = client.stats().overview().await?;
//! client.orders().update_status(42, "shipped").await?;
//! ```
//!
//! Reads return [`ApiResponse`](crate::response::ApiResponse) with transport
//! metadata; mutations return the affected record (or nothing) directly.

mod cart;
mod coupons;
mod orders;
mod products;
mod reviews;
mod stats;
mod users;

pub use cart::*;
pub use coupons::*;
pub use orders::*;
pub use products::*;
pub use reviews::*;
pub use stats::*;
pub use users::*;

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::error::Error;
use crate::response::ApiResponse;
use crate::StorefrontClient;

impl StorefrontClient {
    /// Product catalog operations.
    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi { client: self }
    }

    /// Shopping cart operations for the authenticated user.
    pub fn cart(&self) -> CartApi<'_> {
        CartApi { client: self }
    }

    /// Order operations, both customer-facing and admin.
    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi { client: self }
    }

    /// Review operations, including moderation.
    pub fn reviews(&self) -> ReviewsApi<'_> {
        ReviewsApi { client: self }
    }

    /// User account and admin user management operations.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    /// Coupon management and validation.
    pub fn coupons(&self) -> CouponsApi<'_> {
        CouponsApi { client: self }
    }

    /// Admin statistics.
    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi { client: self }
    }

    // =========================================================================
    // Shared JSON plumbing
    // =========================================================================

    /// GETs a path and deserializes the body, keeping transport metadata.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<ApiResponse<T>, Error> {
        let (response, meta) = self.request(Method::GET, path_and_query, None).await?;
        let body = response.text().await.map_err(ApiError::from)?;
        let data = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;
        Ok(ApiResponse::new(data, meta))
    }

    /// Sends a request and deserializes the response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<String>,
    ) -> Result<T, Error> {
        let (response, _meta) = self.request(method, path_and_query, body).await?;
        let body = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
    }

    /// Sends a request and discards the response body.
    ///
    /// For endpoints that acknowledge with `{"message": ...}` and nothing
    /// the caller can use.
    pub(crate) async fn send_and_drop(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<String>,
    ) -> Result<(), Error> {
        self.request(method, path_and_query, body).await?;
        Ok(())
    }
}

/// Appends a query parameter, inserting `?` or `&` as needed.
pub(crate) fn push_param(query: &mut String, key: &str, value: &str) {
    query.push(if query.is_empty() { '?' } else { '&' });
    query.push_str(key);
    query.push('=');
    query.push_str(&urlencoding::encode(value));
}
