//! Women's health market dashboard.
//!
//! The [`data`] module is the whole computational core: an immutable [`data::Dataset`] of
//! companies, [`data::FilterCriteria`] built from user selections, and pure functions that
//! filter ([`data::filter()`]), aggregate ([`data::summarize`], [`data::query`]) and export
//! ([`data::export`]) it. Everything else is an egui host that calls into it on every
//! interaction.
//!
//! ```rust
//! use wh_market_dashboard::data::loader::{load_builtin, MARKET_CAP, STOCK_EXCHANGE};
//! use wh_market_dashboard::data::{filter, summarize, FilterCriteria};
//!
//! let dataset = load_builtin().unwrap();
//! let criteria = FilterCriteria::new().allow(STOCK_EXCHANGE, ["STO"]);
//! let summary = summarize(filter(&dataset, &criteria), MARKET_CAP);
//! assert_eq!(summary.count, 1);
//! assert_eq!(summary.sum, 339000.0);
//! ```

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use error::{DataError, DataResult, ExportError};
