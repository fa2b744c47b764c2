//! Admin statistics

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::Error;
use crate::response::ApiResponse;
use crate::StorefrontClient;

/// Handle for admin statistics.
///
/// Obtained through [`StorefrontClient::stats`]. Requires an admin account.
pub struct StatsApi<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl StatsApi<'_> {
    /// Fetches the dashboard overview: counts and revenue across users,
    /// products, orders, reviews and coupons.
    pub async fn overview(&self) -> Result<ApiResponse<StoreStats>, Error> {
        self.client.get_json("/admin/stats").await
    }
}

/// Store-wide statistics grouped per area.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreStats {
    pub users: UserStats,
    pub products: ProductStats,
    pub orders: OrderStats,
    pub revenue: RevenueStats,
    pub reviews: ReviewStats,
    pub coupons: CouponStats,
}

/// Account counts.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UserStats {
    pub total: u64,
    pub active: u64,
    /// Accounts created since midnight UTC.
    pub new_today: u64,
}

/// Catalog counts.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProductStats {
    pub total: u64,
    pub active: u64,
    /// Products at or below their minimum stock level.
    pub low_stock: u64,
    pub out_of_stock: u64,
}

/// Order counts by fulfillment state.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderStats {
    pub total: u64,
    pub pending: u64,
    /// Orders that reached delivery.
    pub completed: u64,
    pub cancelled: u64,
}

/// Revenue from delivered orders.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RevenueStats {
    pub total: Decimal,
    /// Revenue from orders delivered since midnight UTC.
    pub today: Decimal,
}

/// Review moderation counts.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReviewStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
}

/// Coupon counts.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CouponStats {
    pub total: u64,
    pub active: u64,
}
