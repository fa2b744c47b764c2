//! Coupon management and validation

use reqwest::Method;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::push_param;
use crate::error::Error;
use crate::model::Record;
use crate::response::ApiResponse;
use crate::StorefrontClient;

/// Handle for coupon operations.
///
/// Obtained through [`StorefrontClient::coupons`]. Listing, creating and
/// updating require an admin; validation is open to any caller building
/// a checkout.
///
/// The service exposes no delete endpoint for coupons. Admin screens
/// that want removal drop the row locally instead (see
/// [`ListScreen::remove_row`](crate::admin::ListScreen::remove_row)).
pub struct CouponsApi<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl CouponsApi<'_> {
    /// Lists coupons (admin only).
    pub async fn list(&self, query: CouponQuery) -> Result<ApiResponse<Vec<Record>>, Error> {
        let path = format!("/coupons{}", query.to_query_string());
        self.client.get_json(&path).await
    }

    /// Creates a coupon (admin only). Codes must be unique.
    pub async fn create(&self, coupon: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&coupon)?;
        self.client
            .send_json(Method::POST, "/coupons", Some(body))
            .await
    }

    /// Applies partial changes to a coupon (admin only).
    pub async fn update(&self, coupon_id: i64, changes: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&changes)?;
        self.client
            .send_json(Method::PUT, &format!("/coupons/{coupon_id}"), Some(body))
            .await
    }

    /// Checks whether a coupon code applies to an order being built.
    ///
    /// Validity failures (expired, below minimum, usage cap reached)
    /// come back as HTTP 400 with the reason in the error message, not
    /// as an `is_valid: false` payload.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let check = CouponCheck::new("SAVE20", 120.0, 3).user_id(7);
    /// let validation = client.coupons().validate(check).await?.into_inner();
    /// println!("discount: {}", validation.discount_amount);
    /// ```
    pub async fn validate(&self, check: CouponCheck) -> Result<ApiResponse<CouponValidation>, Error> {
        let path = format!(
            "/coupons/{}{}",
            urlencoding::encode(&check.code),
            check.to_query_string()
        );
        self.client.get_json(&path).await
    }
}

/// Pagination for coupon listings.
#[derive(Debug, Clone, Default)]
pub struct CouponQuery {
    skip: Option<usize>,
    limit: Option<usize>,
}

impl CouponQuery {
    /// Creates an empty query (service defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of coupons to skip.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Page size (the service caps this at 100).
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
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
        query
    }
}

/// The order context a coupon is validated against.
///
/// Order amount and item count are required by the service; the user id
/// additionally enforces per-user usage caps.
#[derive(Debug, Clone)]
pub struct CouponCheck {
    code: String,
    order_amount: f64,
    item_count: u32,
    user_id: Option<i64>,
}

impl CouponCheck {
    /// Creates a check for the given code against an order subtotal and
    /// item count.
    pub fn new(code: impl Into<String>, order_amount: f64, item_count: u32) -> Self {
        Self {
            code: code.into(),
            order_amount,
            item_count,
            user_id: None,
        }
    }

    /// Enforces the per-user usage cap for this user.
    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    fn to_query_string(&self) -> String {
        let mut query = String::new();
        push_param(&mut query, "order_amount", &self.order_amount.to_string());
        push_param(&mut query, "item_count", &self.item_count.to_string());
        if let Some(user_id) = self.user_id {
            push_param(&mut query, "user_id", &user_id.to_string());
        }
        query
    }
}

/// Successful coupon validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponValidation {
    /// The matched coupon.
    pub coupon: Record,
    /// Discount this coupon grants on the submitted order amount.
    pub discount_amount: Decimal,
    /// Always `true`; invalid coupons surface as errors instead.
    pub is_valid: bool,
}
