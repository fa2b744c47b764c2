//! Order operations

use reqwest::Method;
use serde_json::json;

use super::push_param;
use crate::error::Error;
use crate::model::Record;
use crate::response::ApiResponse;
use crate::StorefrontClient;

/// Handle for order operations.
///
/// Obtained through [`StorefrontClient::orders`]. Customer calls operate
/// on the authenticated user's own orders; the `all_`/`admin_` variants
/// require an admin (status updates too).
pub struct OrdersApi<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl OrdersApi<'_> {
    /// Lists the authenticated user's orders, newest first.
    pub async fn list(&self, query: OrderQuery) -> Result<ApiResponse<Vec<Record>>, Error> {
        let path = format!("/orders{}", query.to_query_string());
        self.client.get_json(&path).await
    }

    /// Lists all orders across users, newest first (admin only).
    pub async fn list_all(&self, query: OrderQuery) -> Result<ApiResponse<Vec<Record>>, Error> {
        let path = format!("/admin/orders{}", query.to_query_string());
        self.client.get_json(&path).await
    }

    /// Gets one of the authenticated user's orders.
    pub async fn get(&self, order_id: i64) -> Result<ApiResponse<Record>, Error> {
        self.client.get_json(&format!("/orders/{order_id}")).await
    }

    /// Places an order from the given payload (items, addresses, payment
    /// method). Returns the created order.
    pub async fn create(&self, order: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&order)?;
        self.client
            .send_json(Method::POST, "/orders", Some(body))
            .await
    }

    /// Applies partial changes to an order (admin only).
    pub async fn update(&self, order_id: i64, changes: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&changes)?;
        self.client
            .send_json(Method::PUT, &format!("/orders/{order_id}"), Some(body))
            .await
    }

    /// Moves an order to a new fulfillment status (admin only).
    ///
    /// The service accepts the status name in upper case, e.g. `"SHIPPED"`.
    pub async fn update_status(&self, order_id: i64, status: &str) -> Result<Record, Error> {
        let body = json!({ "status": status }).to_string();
        self.client
            .send_json(Method::PUT, &format!("/orders/{order_id}"), Some(body))
            .await
    }

    /// Cancels one of the authenticated user's own orders.
    ///
    /// Only pending and confirmed orders qualify; the service restocks
    /// the items.
    pub async fn cancel(&self, order_id: i64) -> Result<(), Error> {
        self.client
            .send_and_drop(Method::DELETE, &format!("/orders/{order_id}"), None)
            .await
    }

    /// Cancels any order regardless of owner or status (admin only).
    pub async fn admin_cancel(&self, order_id: i64) -> Result<(), Error> {
        self.client
            .send_and_drop(Method::DELETE, &format!("/admin/orders/{order_id}"), None)
            .await
    }
}

/// Pagination and status filter for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    skip: Option<usize>,
    limit: Option<usize>,
    status: Option<String>,
}

impl OrderQuery {
    /// Creates an empty query (service defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders to skip.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Page size (the service caps this at 100).
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filters to one fulfillment status.
    ///
    /// Takes the lower-case wire value, e.g. `"pending"` (unlike
    /// [`OrdersApi::update_status`], which wants the upper-case name).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub(crate) fn to_query_string(&self) -> String {
        let mut query = String::new();
        if let Some(skip) = self.skip {
            push_param(&mut query, "skip", &skip.to_string());
        }
        if let Some(limit) = self.limit {
            push_param(&mut query, "limit", &limit.to_string());
        }
        if let Some(ref status) = self.status {
            push_param(&mut query, "status", status);
        }
        query
    }
}
