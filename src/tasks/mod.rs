//! Background Tasks Module
//!
//! Contains background tasks that run alongside the HTTP server.
//!
//! # Tasks
//! - Stats Watcher: refreshes cached statistics when the item file changes

mod watcher;

pub use watcher::{spawn_stats_watcher, StatsWatcher};
