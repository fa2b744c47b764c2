//! Shopping cart operations

use reqwest::Method;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::error::Error;
use crate::model::Record;
use crate::response::ApiResponse;
use crate::StorefrontClient;

/// Handle for cart operations on the authenticated user's cart.
///
/// Obtained through [`StorefrontClient::cart`].
pub struct CartApi<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl CartApi<'_> {
    /// Gets the cart with per-item product details and the running total.
    pub async fn get(&self) -> Result<ApiResponse<CartSummary>, Error> {
        self.client.get_json("/cart").await
    }

    /// Adds a product to the cart. Returns the created cart item.
    ///
    /// Quantities accumulate: adding a product already in the cart bumps
    /// the existing item.
    pub async fn add(&self, product_id: i64, quantity: u32) -> Result<Record, Error> {
        let body = json!({
            "product_id": product_id,
            "quantity": quantity,
        })
        .to_string();
        self.client.send_json(Method::POST, "/cart", Some(body)).await
    }

    /// Adds a product with selected options (size, color, ...).
    pub async fn add_with_options(
        &self,
        product_id: i64,
        quantity: u32,
        options: serde_json::Value,
    ) -> Result<Record, Error> {
        let body = json!({
            "product_id": product_id,
            "quantity": quantity,
            "selected_options": options,
        })
        .to_string();
        self.client.send_json(Method::POST, "/cart", Some(body)).await
    }

    /// Changes the quantity of a cart item.
    pub async fn update_item(&self, item_id: i64, quantity: u32) -> Result<Record, Error> {
        let body = json!({ "quantity": quantity }).to_string();
        self.client
            .send_json(Method::PUT, &format!("/cart/{item_id}"), Some(body))
            .await
    }

    /// Removes one item from the cart.
    pub async fn remove_item(&self, item_id: i64) -> Result<(), Error> {
        self.client
            .send_and_drop(Method::DELETE, &format!("/cart/{item_id}"), None)
            .await
    }

    /// Empties the cart.
    pub async fn clear(&self) -> Result<(), Error> {
        self.client.send_and_drop(Method::DELETE, "/cart", None).await
    }
}

/// The authenticated user's cart with totals.
///
/// `total_amount` reflects sale prices where they apply.
#[derive(Debug, Clone, Deserialize)]
pub struct CartSummary {
    /// Cart items, each with the product embedded as `product`.
    pub items: Vec<Record>,
    /// Number of distinct items in the cart.
    pub total_items: usize,
    /// Sum over items of effective price times quantity.
    pub total_amount: Decimal,
}

impl CartSummary {
    /// Returns `true` if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
