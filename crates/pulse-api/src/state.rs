//! Application state shared across all handlers.

use std::sync::Arc;

use pulse_core::config::AppConfig;
use pulse_store::MemoryPresenceStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The presence store backend
    pub store: Arc<MemoryPresenceStore>,
}

impl AppState {
    /// Build state from configuration with a fresh in-memory store.
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(MemoryPresenceStore::new(&config.store));
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
