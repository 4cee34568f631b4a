//! Presence tracker timing configuration.
//!
//! Each knob tunes one timer of the tracker; none of them alter the
//! state-machine logic itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing configuration for a presence tracker session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Interval between heartbeat reports in milliseconds.
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_ms: u64,
    /// Inactivity (while visible) before demoting active → idle.
    #[serde(default = "default_idle_threshold")]
    pub idle_threshold_ms: u64,
    /// Inactivity before demoting to offline.
    #[serde(default = "default_offline_threshold")]
    pub offline_threshold_ms: u64,
    /// How long the page may stay hidden before the idle countdown starts
    /// counting it against the session. Brief tab switches stay active.
    #[serde(default = "default_hidden_grace_period")]
    pub hidden_grace_period_ms: u64,
    /// Debounce window for the extra report sent on promotion to active.
    #[serde(default = "default_sync_debounce")]
    pub sync_debounce_ms: u64,
}

impl TrackerConfig {
    /// Heartbeat interval as a [`Duration`].
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    /// Idle threshold as a [`Duration`].
    pub fn idle_threshold(&self) -> Duration {
        Duration::from_millis(self.idle_threshold_ms)
    }

    /// Offline threshold as a [`Duration`].
    pub fn offline_threshold(&self) -> Duration {
        Duration::from_millis(self.offline_threshold_ms)
    }

    /// Hidden grace period as a [`Duration`].
    pub fn hidden_grace_period(&self) -> Duration {
        Duration::from_millis(self.hidden_grace_period_ms)
    }

    /// Promotion-report debounce window as a [`Duration`].
    pub fn sync_debounce(&self) -> Duration {
        Duration::from_millis(self.sync_debounce_ms)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_ms: default_heartbeat_interval(),
            idle_threshold_ms: default_idle_threshold(),
            offline_threshold_ms: default_offline_threshold(),
            hidden_grace_period_ms: default_hidden_grace_period(),
            sync_debounce_ms: default_sync_debounce(),
        }
    }
}

fn default_heartbeat_interval() -> u64 {
    30_000
}

fn default_idle_threshold() -> u64 {
    300_000
}

fn default_offline_threshold() -> u64 {
    900_000
}

fn default_hidden_grace_period() -> u64 {
    60_000
}

fn default_sync_debounce() -> u64 {
    1_000
}
