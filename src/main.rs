//! Pulse Server — presence store service
//!
//! Main entry point that wires the store, the API router, and the stale
//! session sweeper together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing_subscriber::{EnvFilter, fmt};

use pulse_api::AppState;
use pulse_core::config::AppConfig;
use pulse_core::error::AppError;
use pulse_store::MemoryPresenceStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PULSE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Pulse v{}", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config);

    spawn_stale_sweeper(
        Arc::clone(&state.store),
        state.config.store.staleness_window(),
    );

    let router = pulse_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Pulse listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Pulse shut down cleanly");
    Ok(())
}

/// Periodically drop per-session records that fell out of the staleness
/// window. Queries are correct without this; it only bounds memory.
fn spawn_stale_sweeper(store: Arc<MemoryPresenceStore>, staleness_window: Duration) {
    // Sweeping at the window size keeps dead sessions around for at most
    // two windows.
    let mut interval = tokio::time::interval(staleness_window.max(Duration::from_secs(1)));
    tokio::spawn(async move {
        loop {
            interval.tick().await;
            let evicted = store.evict_stale(Utc::now());
            if evicted > 0 {
                tracing::info!("Stale session sweep: {} session(s) evicted", evicted);
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
