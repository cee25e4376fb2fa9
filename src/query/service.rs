//! Query Service Module
//!
//! Filter, paginate, look up and create items on top of the [`ItemStore`].

use std::sync::Arc;

use tracing::info;

use crate::error::{CatalogError, Result};
use crate::store::{Item, ItemStore, NewItem};

// == Item Page ==
/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPage {
    /// Items on the requested page
    pub items: Vec<Item>,
    /// Number of items matching the filter across all pages
    pub total_count: usize,
}

// == Query Service ==
/// Read and create operations exposed to the API.
#[derive(Debug, Clone)]
pub struct QueryService {
    store: Arc<ItemStore>,
    default_limit: usize,
}

impl QueryService {
    // == Constructor ==
    /// Creates a service over `store` with the given default page size.
    pub fn new(store: Arc<ItemStore>, default_limit: usize) -> Self {
        Self {
            store,
            default_limit: default_limit.max(1),
        }
    }

    /// Page size used when the caller gives none.
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    // == List ==
    /// Returns page `page` (1-based) of at most `limit` items matching `filter`.
    ///
    /// `filter` matches case-insensitively against name or category. Pages past
    /// the end come back empty.
    pub async fn list(
        &self,
        filter: Option<&str>,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> Result<ItemPage> {
        let items = self.store.read_all().await?;
        Ok(paginate(
            items,
            filter,
            page.filter(|&p| p >= 1).unwrap_or(1),
            limit.filter(|&l| l >= 1).unwrap_or(self.default_limit),
        ))
    }

    // == Get By Id ==
    /// Looks up a single item.
    pub async fn get_by_id(&self, id: u64) -> Result<Item> {
        self.store
            .read_all()
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    // == Create ==
    /// Validates and appends a new item, returning it with its assigned id.
    pub async fn create(&self, new_item: NewItem) -> Result<Item> {
        if let Some(error_msg) = new_item.validate() {
            return Err(CatalogError::InvalidRequest(error_msg));
        }

        let item = self.store.append(new_item).await?;
        info!("Created item {} ({})", item.id, item.name);
        Ok(item)
    }
}

/// Filters, counts, then slices `[(page-1)*limit, page*limit)`.
fn paginate(items: Vec<Item>, filter: Option<&str>, page: usize, limit: usize) -> ItemPage {
    let needle = filter
        .filter(|q| !q.trim().is_empty())
        .map(str::to_lowercase);

    let matched: Vec<Item> = match needle {
        Some(needle) => items.into_iter().filter(|i| i.matches(&needle)).collect(),
        None => items,
    };

    let total_count = matched.len();
    let start = (page - 1).saturating_mul(limit);
    let items = matched.into_iter().skip(start).take(limit).collect();

    ItemPage { items, total_count }
}
