//! Storefront admin client library
//!
//! An async Rust client for the storefront REST API, plus the client-side
//! list engine behind its admin screens: search, per-column filtering,
//! sorting, pagination, row selection and CSV export over fetched records.

pub mod admin;
pub mod api;
pub mod auth;
pub mod error;
pub mod grid;
pub mod model;
pub mod response;

mod client;

pub use client::*;
pub use error::Error;
pub use error::Result;
pub use response::ApiResponse;
pub use response::ResponseMeta;
