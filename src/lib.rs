//! # Supplyboard
//!
//! A filterable, multi-page analytics dashboard over a supply-chain CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 CSV (supply_chain_data.csv)              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [data::load, cached once]
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Dataset                            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [filter: Product type × Location]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    FilteredView                          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [page router → query catalog]
//! ┌─────────────────────────────────────────────────────────┐
//! │          PageReport (AggregationResult per widget)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [render]
//! ┌─────────────────────────────────────────────────────────┐
//! │          TextRenderer / JsonRenderer / HTTP API          │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dashboard;
pub mod data;
pub mod filter;
pub mod format;
pub mod page;
pub mod query;
pub mod render;
pub mod stats;

#[cfg(feature = "ui")]
pub mod web;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::dashboard::{Dashboard, DashboardError, DashboardResult, PageReport};
    pub use crate::data::{CategoryColumn, DataError, Dataset, NumericColumn, Record};
    pub use crate::filter::{filter, FilterSelection, FilteredView};
    pub use crate::format::MetricFormat;
    pub use crate::page::{DisplayKind, PageId, Widget};
    pub use crate::query::{AggregationResult, QueryId};
    pub use crate::render::{JsonRenderer, Renderer, TextRenderer};
}
