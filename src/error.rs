//! Error types for the catalog server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Catalog Error Enum ==
/// Unified error type for the catalog server.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The item collection could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The persisted collection is not a valid item array
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// No item with the requested id
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Statistics could not be (re)computed
    #[error("Statistics unavailable: {0}")]
    StatsUnavailable(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The change watcher could not be established
    #[error("Watcher unavailable: {0}")]
    WatcherUnavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, "Item not found".to_string()),
            CatalogError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // Details stay in the log; clients get a fixed message
            CatalogError::StorageUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage unavailable".to_string())
            }
            CatalogError::CorruptData(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Corrupt item data".to_string())
            }
            CatalogError::StatsUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Statistics calculation failed or data file is unavailable".to_string(),
            ),
            CatalogError::WatcherUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse::new(message));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog server.
pub type Result<T> = std::result::Result<T, CatalogError>;
