//! Item Catalog - A JSON-file-backed product catalog API
//!
//! Serves item listings, search, pagination and cached aggregate statistics.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use item_catalog::api::create_router;
use item_catalog::tasks::StatsWatcher;
use item_catalog::{spawn_stats_watcher, AppState, Config};

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the item store, query service and stats cache
/// 4. Compute the initial stats snapshot
/// 5. Start the stats watcher (degrades to no auto-refresh on failure)
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "item_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Item Catalog Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: data_path={}, port={}, debounce={}ms, default_limit={}",
        config.data_path.display(),
        config.server_port,
        config.debounce_ms,
        config.default_limit
    );

    let state = AppState::from_config(&config);

    if state.stats.refresh().await {
        info!("Initial stats snapshot cached");
    } else {
        warn!("Initial stats calculation failed; will retry on first request");
    }

    let watcher = match spawn_stats_watcher(
        state.stats.clone(),
        &config.data_path,
        Duration::from_millis(config.debounce_ms),
    ) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!(
                "Could not start file watcher, stats will only refresh after local writes: {}",
                e
            );
            None
        }
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(watcher))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, stops the stats watcher and allows graceful shutdown.
async fn shutdown_signal(watcher: Option<StatsWatcher>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(watcher) = watcher {
        watcher.abort();
        warn!("Stats watcher stopped");
    }
}
