//! Stats Module
//!
//! Cached aggregate statistics over the item collection.

mod cache;
mod snapshot;


// Re-export public types
pub use cache::StatsCache;
pub use snapshot::{round_cents, StatsSnapshot};
