//! Client-side list presentation engine
//!
//! Turns a fetched page of [`Record`](crate::model::Record)s into the rows an
//! admin table actually shows. The pipeline runs in a fixed order (search,
//! per-column filters, sort, pagination) and is pure: the same records,
//! columns and query always produce the same [`GridView`].
//!
//! [`Column`] describes how one field is read, shown and filtered.
//! [`GridQuery`] holds the user's current search/filter/sort/page state and
//! encodes the page-reset rules (search, filter and page-size changes snap
//! back to page one; sorting stays put). [`Selection`] tracks checked rows by
//! [`RowKey`] across pages, and [`export`] serializes the current rows to CSV.
//!
//! # Example
//!
//! ```
//! use storefront_lib::grid::{compute_view, Column, GridQuery};
//! use storefront_lib::model::Record;
//!
//! let records = vec![
//!     Record::new().set("name", "Wireless Mouse").set("price", 24.99),
//!     Record::new().set("name", "Mechanical Keyboard").set("price", 89.99),
//! ];
//! let columns = vec![Column::new("name", "Name"), Column::new("price", "Price")];
//!
//! let mut query = GridQuery::new();
//! query.set_search("mouse");
//!
//! let view = compute_view(&records, &columns, &query);
//! assert_eq!(view.len(), 1);
//! assert_eq!(view.rows()[0].record.text("name"), "Wireless Mouse");
//! ```

pub mod export;

mod column;
mod query;
mod selection;
mod view;

pub use column::{Accessor, Column, FilterKind, FilterOption, Renderer};
pub use query::{Direction, GridQuery, PageRequest, Sort, DEFAULT_PAGE_SIZE, FILTER_ALL};
pub use selection::{RowKey, Selection};
pub use view::{compute_view, GridView, Row};
