//! Stats Cache Module
//!
//! Holds at most one snapshot, recomputed lazily on read and eagerly on refresh.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::error::{CatalogError, Result};
use crate::stats::StatsSnapshot;
use crate::store::{ItemSource, ItemStore};

// == Cache State ==
#[derive(Debug, Clone)]
enum CacheState {
    Valid(StatsSnapshot),
    Invalid,
}

// == Stats Cache ==
/// Cached aggregate over an [`ItemSource`].
///
/// Starts `Invalid`. A read that finds the cache `Invalid` recomputes while
/// holding the state lock, so concurrent readers share one storage read.
/// A failed recomputation leaves the cache `Invalid`.
#[derive(Debug)]
pub struct StatsCache<S = ItemStore> {
    source: Arc<S>,
    state: Mutex<CacheState>,
}

impl<S: ItemSource> StatsCache<S> {
    // == Constructor ==
    /// Creates an empty (invalid) cache over `source`.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState::Invalid),
        }
    }

    // == Get ==
    /// Returns the current snapshot, recomputing first if needed.
    pub async fn get(&self) -> Result<StatsSnapshot> {
        let mut state = self.state.lock().await;
        Self::ensure_valid_locked(&self.source, &mut state)
            .await
            .map_err(|e| CatalogError::StatsUnavailable(e.to_string()))?;

        match &*state {
            CacheState::Valid(snapshot) => Ok(snapshot.clone()),
            CacheState::Invalid => Err(CatalogError::StatsUnavailable(
                "Statistics calculation failed or data file is unavailable".to_string(),
            )),
        }
    }

    // == Ensure Valid ==
    /// Recomputes the snapshot if the cache is invalid.
    ///
    /// Returns true if the cache is valid afterwards.
    pub async fn ensure_valid(&self) -> bool {
        let mut state = self.state.lock().await;
        Self::ensure_valid_locked(&self.source, &mut state)
            .await
            .is_ok()
    }

    // == Invalidate ==
    /// Drops the cached snapshot. Idempotent.
    pub async fn invalidate(&self) {
        *self.state.lock().await = CacheState::Invalid;
    }

    // == Refresh ==
    /// Invalidates and immediately recomputes.
    pub async fn refresh(&self) -> bool {
        let mut state = self.state.lock().await;
        *state = CacheState::Invalid;
        Self::ensure_valid_locked(&self.source, &mut state)
            .await
            .is_ok()
    }

    /// Returns true if a snapshot is currently cached.
    pub async fn is_valid(&self) -> bool {
        matches!(*self.state.lock().await, CacheState::Valid(_))
    }

    async fn ensure_valid_locked(source: &S, state: &mut CacheState) -> Result<()> {
        if let CacheState::Valid(_) = state {
            return Ok(());
        }

        match source.read_all().await {
            Ok(items) => {
                let snapshot = StatsSnapshot::compute(&items);
                debug!(
                    "Stats cached: total={}, averagePrice={}, cachedAt={}",
                    snapshot.total, snapshot.average_price, snapshot.cached_at
                );
                *state = CacheState::Valid(snapshot);
                Ok(())
            }
            Err(e) => {
                error!("Failed to calculate statistics: {}", e);
                *state = CacheState::Invalid;
                Err(e)
            }
        }
    }
}
