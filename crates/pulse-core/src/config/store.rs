//! Presence store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Presence store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Grace window after a session's last report before the store deems
    /// it offline, regardless of what the client last claimed.
    #[serde(default = "default_staleness_window")]
    pub staleness_window_ms: u64,
    /// Request timeout for the HTTP store client in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl StoreConfig {
    /// Staleness window as a [`Duration`].
    pub fn staleness_window(&self) -> Duration {
        Duration::from_millis(self.staleness_window_ms)
    }

    /// HTTP request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            staleness_window_ms: default_staleness_window(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

fn default_staleness_window() -> u64 {
    90_000
}

fn default_request_timeout() -> u64 {
    5_000
}
