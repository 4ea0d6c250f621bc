//! Data layer: core types, the built-in table, filtering, aggregation and export.
//!
//! Architecture:
//! ```text
//!  assets/companies.json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse literal → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<Record>, schema, category index
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐       ┌──────────┐
//!   │  filter   │ ───► │ summary   │  sum / mean / median / count
//!   └──────────┘       └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  CSV with `N/A` markers
//!   └──────────┘
//! ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;

pub use filter::{filter, filter_records, filtered_indices, matches_criteria, FilterCriteria, NumericRange};
pub use model::{Dataset, MetricValue, Record, Schema};
pub use summary::{median_of, query, summarize, Aggregates, QueryResult, QuerySpec, Summary};
