//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::error::{CatalogError, Result};
use crate::models::{HealthResponse, ListQuery};
use crate::query::QueryService;
use crate::stats::{StatsCache, StatsSnapshot};
use crate::store::{Item, ItemStore, NewItem};

/// Header carrying the filtered item count on list responses.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Application state shared across all handlers.
///
/// The query service and stats cache read the same [`ItemStore`].
#[derive(Clone)]
pub struct AppState {
    /// Item listing, lookup and creation
    pub items: QueryService,
    /// Cached aggregate statistics
    pub stats: Arc<StatsCache>,
}

impl AppState {
    /// Creates a new AppState over the given store.
    pub fn new(store: Arc<ItemStore>, default_limit: usize) -> Self {
        Self {
            items: QueryService::new(store.clone(), default_limit),
            stats: Arc::new(StatsCache::new(store)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let store = Arc::new(ItemStore::new(config.data_path.clone()));
        Self::new(store, config.default_limit)
    }
}

/// Handler for GET /api/items
///
/// Returns one page of items and the filtered total in `X-Total-Count`.
pub async fn list_items_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .items
        .list(query.filter(), query.page(), query.limit())
        .await?;

    Ok((
        [(TOTAL_COUNT_HEADER, page.total_count.to_string())],
        Json(page.items),
    ))
}

/// Handler for GET /api/items/:id
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let id: u64 = id.parse().map_err(|_| CatalogError::NotFound(id.clone()))?;
    let item = state.items.get_by_id(id).await?;

    Ok(Json(item))
}

/// Handler for POST /api/items
///
/// Assigns an id, persists the item and invalidates the stats cache.
pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(new_item): Json<NewItem>,
) -> Result<(StatusCode, Json<Item>)> {
    let item = state.items.create(new_item).await?;
    state.stats.invalidate().await;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /api/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsSnapshot>> {
    Ok(Json(state.stats.get().await?))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
