//! Liveness state machine.
//!
//! Pure transition functions over [`PresenceState`]: no clock, no I/O.
//! `now` is always a parameter, and the timer layer only feeds
//! [`Trigger`]s in. Instants are [`tokio::time::Instant`] so the driver's
//! paused-clock tests and the machine share one time base.

use tokio::time::Instant;

use pulse_core::config::tracker::TrackerConfig;
use pulse_core::presence::PresenceStatus;

/// Local liveness state of one tracker session.
#[derive(Debug, Clone, Copy)]
pub struct PresenceState {
    /// Current locally-observed liveness.
    pub status: PresenceStatus,
    /// Most recent qualifying user interaction.
    pub last_activity_at: Instant,
    /// Set while the page/window is hidden.
    pub hidden_at: Option<Instant>,
    /// Last successful report to the remote store, or `None`.
    pub last_synced_at: Option<Instant>,
}

impl PresenceState {
    /// Fresh state at session start: active, just interacted, visible.
    pub fn new(now: Instant) -> Self {
        Self {
            status: PresenceStatus::Active,
            last_activity_at: now,
            hidden_at: None,
            last_synced_at: None,
        }
    }
}

/// Named transition triggers fed into the machine by the driver layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A qualifying user interaction (pointer, key, scroll, touch, focus).
    Activity,
    /// The page/window became hidden.
    Hidden,
    /// The page/window became visible again.
    Visible,
    /// The idle timer elapsed.
    IdleTimeout,
    /// The offline timer elapsed.
    OfflineTimeout,
    /// Network reachability was lost.
    ConnectivityLost,
}

/// What the driver must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing beyond the regular heartbeat.
    None,
    /// Schedule one debounced report (promotion to active; not urgent).
    ReportDebounced,
    /// Report right away (offline transitions are latency-sensitive).
    ReportImmediate,
}

/// Apply one trigger to the state, returning the required [`Effect`].
///
/// Timeout triggers re-check their deadline against `now`, so a stale
/// timer that fires just after an activity signal is a no-op; demotions
/// stay monotonic with elapsed inactivity.
pub fn apply(
    state: &mut PresenceState,
    trigger: Trigger,
    now: Instant,
    config: &TrackerConfig,
) -> Effect {
    match trigger {
        Trigger::Activity => {
            // Activity while hidden does not qualify (background media,
            // synthetic events); visibility regain is its own trigger.
            if state.hidden_at.is_some() {
                return Effect::None;
            }
            state.last_activity_at = now;
            promote(state)
        }
        Trigger::Hidden => {
            if state.hidden_at.is_none() {
                state.hidden_at = Some(now);
            }
            Effect::None
        }
        Trigger::Visible => {
            state.hidden_at = None;
            state.last_activity_at = now;
            promote(state)
        }
        Trigger::IdleTimeout => {
            if state.status == PresenceStatus::Active && idle_deadline(state, config) <= now {
                state.status = PresenceStatus::Idle;
            }
            Effect::None
        }
        Trigger::OfflineTimeout => {
            if state.status != PresenceStatus::Offline
                && state.last_activity_at + config.offline_threshold() <= now
            {
                state.status = PresenceStatus::Offline;
                return Effect::ReportImmediate;
            }
            Effect::None
        }
        Trigger::ConnectivityLost => {
            if state.status == PresenceStatus::Offline {
                return Effect::None;
            }
            state.status = PresenceStatus::Offline;
            Effect::ReportImmediate
        }
    }
}

/// The next timeout the driver must schedule, if any.
///
/// Active sessions wait for the idle deadline, idle sessions for the
/// offline deadline, offline sessions for nothing.
pub fn next_deadline(state: &PresenceState, config: &TrackerConfig) -> Option<(Trigger, Instant)> {
    match state.status {
        PresenceStatus::Active => Some((Trigger::IdleTimeout, idle_deadline(state, config))),
        PresenceStatus::Idle => Some((
            Trigger::OfflineTimeout,
            state.last_activity_at + config.offline_threshold(),
        )),
        PresenceStatus::Offline => None,
    }
}

/// When an active session becomes idle: inactivity past the threshold
/// while visible, or the hidden grace period expiring.
fn idle_deadline(state: &PresenceState, config: &TrackerConfig) -> Instant {
    let by_inactivity = state.last_activity_at + config.idle_threshold();
    match state.hidden_at {
        Some(hidden_at) => by_inactivity.min(hidden_at + config.hidden_grace_period()),
        None => by_inactivity,
    }
}

fn promote(state: &mut PresenceState) -> Effect {
    if state.status == PresenceStatus::Active {
        Effect::None
    } else {
        state.status = PresenceStatus::Active;
        Effect::ReportDebounced
    }
}
