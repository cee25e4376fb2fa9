//! Stats Watcher Task
//!
//! Watches the directory holding the item collection and refreshes the
//! stats cache after a quiet period following each burst of changes.

use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::error::{CatalogError, Result};
use crate::stats::StatsCache;
use crate::store::ItemSource;

// == Stats Watcher ==
/// Handle to a running watcher.
///
/// Dropping the handle stops filesystem notifications; the task then exits
/// once its channel closes.
pub struct StatsWatcher {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl StatsWatcher {
    /// Stops the refresh task.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Returns true once the refresh task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns a task that refreshes `stats` whenever `data_path` changes.
///
/// The parent directory is watched non-recursively and only events naming
/// the collection file count. The first such event opens a `debounce`
/// window; every further one restarts it. One refresh runs when the window
/// closes without new events.
///
/// Must be called from within a Tokio runtime.
///
/// # Errors
/// Returns `WatcherUnavailable` if the watch cannot be established. The
/// cache keeps working but is then only refreshed by reads after an
/// explicit invalidation.
///
/// # Example
/// ```ignore
/// let watcher = spawn_stats_watcher(stats.clone(), &config.data_path, Duration::from_millis(100))?;
/// // Later, during shutdown:
/// watcher.abort();
/// ```
pub fn spawn_stats_watcher<S: ItemSource>(
    stats: Arc<StatsCache<S>>,
    data_path: &Path,
    debounce: Duration,
) -> Result<StatsWatcher> {
    let file_name = data_path.file_name().map(|n| n.to_os_string()).ok_or_else(|| {
        CatalogError::WatcherUnavailable(format!("{} has no file name", data_path.display()))
    })?;
    let watch_dir = match data_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })
    .map_err(|e| CatalogError::WatcherUnavailable(e.to_string()))?;

    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| {
            CatalogError::WatcherUnavailable(format!("{}: {}", watch_dir.display(), e))
        })?;

    let task = tokio::spawn(async move {
        info!(
            "Watching {} for changes to {:?} (debounce {:?})",
            watch_dir.display(),
            file_name,
            debounce
        );

        while let Some(res) = rx.recv().await {
            if !qualifies(&res, &file_name) {
                continue;
            }

            // Restart the window on every qualifying event until it goes quiet
            let mut deadline = Instant::now() + debounce;
            let mut closed = false;
            loop {
                match tokio::time::timeout_at(deadline, rx.recv()).await {
                    Ok(Some(res)) => {
                        if qualifies(&res, &file_name) {
                            deadline = Instant::now() + debounce;
                        }
                    }
                    Ok(None) => {
                        closed = true;
                        break;
                    }
                    Err(_) => break,
                }
            }

            info!("File change detected on {:?}. Recalculating stats...", file_name);
            stats.refresh().await;

            if closed {
                break;
            }
        }

        debug!("Stats watcher stopped");
    });

    Ok(StatsWatcher {
        _watcher: watcher,
        task,
    })
}

/// Returns true for create/modify/remove events that name the collection file.
fn qualifies(res: &notify::Result<Event>, file_name: &OsString) -> bool {
    match res {
        Ok(event) => {
            matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) && event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()))
        }
        Err(e) => {
            error!("FS watcher error, stats may not update automatically: {}", e);
            false
        }
    }
}
