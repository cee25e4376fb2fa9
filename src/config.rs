//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the JSON item collection
    pub data_path: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Quiet window in milliseconds before a file change refreshes the stats
    pub debounce_ms: u64,
    /// Page size used when a list request gives no usable `_limit`
    pub default_limit: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_PATH` - Item collection file (default: data/items.json)
    /// - `SERVER_PORT` - HTTP server port (default: 4001)
    /// - `STATS_DEBOUNCE_MS` - Watcher debounce window (default: 100)
    /// - `DEFAULT_PAGE_LIMIT` - Default list page size (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_path: env::var("DATA_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            debounce_ms: env::var("STATS_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.debounce_ms),
            default_limit: env::var("DEFAULT_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&limit: &usize| limit >= 1)
                .unwrap_or(defaults.default_limit),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/items.json"),
            server_port: 4001,
            debounce_ms: 100,
            default_limit: 10,
        }
    }
}
