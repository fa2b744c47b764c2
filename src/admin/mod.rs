//! Controllers for the admin list screens
//!
//! [`ListScreen`] pairs the pure pipeline from [`grid`](crate::grid) with
//! the state one admin table keeps between renders: the query, the row
//! selection, the fetched collection, and the refresh bookkeeping that
//! drops stale fetch results. The `*_screen` constructors build the stock
//! screens with their column layouts and filter presets.
//!
//! # Example
//!
//! ```no_run
//! use storefront_lib::admin::products_screen;
//! use storefront_lib::auth::StaticTokenProvider;
//! use storefront_lib::StorefrontClient;
//!
//! # async fn run() -> Result<(), storefront_lib::Error> {
//! let client = StorefrontClient::builder()
//!     .url("https://shop.example.com/api")
//!     .token_provider(StaticTokenProvider::new("token"))
//!     .build();
//!
//! let mut screen = products_screen();
//! let token = screen.begin_refresh();
//! match client.products().list(Default::default()).await {
//!     Ok(page) => {
//!         screen.complete_refresh(token, page.into_inner().products);
//!     }
//!     Err(_) => screen.fail_refresh(token),
//! }
//!
//! screen.set_filter("is_active", "true");
//! for row in screen.view().rows() {
//!     println!("{}", row.record.text("name"));
//! }
//! # Ok(())
//! # }
//! ```

mod screen;
mod screens;

pub use screen::ListScreen;
pub use screens::{coupons_screen, orders_screen, products_screen, reviews_screen, users_screen};
