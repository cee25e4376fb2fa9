//! Item Catalog - A JSON-file-backed product catalog API
//!
//! Serves item listings, search, pagination and cached aggregate statistics
//! that refresh when the backing file changes.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod stats;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{CatalogError, Result};
pub use tasks::spawn_stats_watcher;
