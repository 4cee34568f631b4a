//! Presence wire types shared by the tracker, the store, and the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{SessionId, UserId};

/// Liveness status of one client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    /// User interacted recently and the page is visible.
    Active,
    /// Connected but inactive beyond the idle threshold. Still online.
    Idle,
    /// Not connected, or inactive beyond the offline threshold.
    Offline,
}

impl PresenceStatus {
    /// Parses from a string, failing closed to `Offline`.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "active" => Self::Active,
            "idle" => Self::Idle,
            _ => Self::Offline,
        }
    }

    /// Converts to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Idle => "idle",
            Self::Offline => "offline",
        }
    }

    /// Whether observers should see this session as online.
    ///
    /// Idle counts as online; only `Offline` does not.
    pub fn is_online(&self) -> bool {
        !matches!(self, Self::Offline)
    }
}

/// One status report from a client session to the presence store.
///
/// Idempotent and safe to retry: the store applies reports in arrival
/// order per session, so re-sending the same report is harmless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceReport {
    /// User the session belongs to.
    pub user_id: UserId,
    /// The reporting session (one per tab/window).
    pub session_id: SessionId,
    /// Status the session claims.
    pub status: PresenceStatus,
    /// Client-side timestamp, carried for diagnostics only. Staleness is
    /// always computed from the store's own receive time.
    pub reported_at: DateTime<Utc>,
}

impl PresenceReport {
    /// Build a report stamped with the current time.
    pub fn now(user_id: UserId, session_id: SessionId, status: PresenceStatus) -> Self {
        Self {
            user_id,
            session_id,
            status,
            reported_at: Utc::now(),
        }
    }
}

/// Answer to a presence query for one subject user.
///
/// Derived at query time from the store's per-session records; never
/// persisted by consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceQueryResult {
    /// True if any of the subject's sessions is active or idle and fresh.
    pub is_online: bool,
    /// Server-side time of the most recent report across all sessions,
    /// or `None` if the subject has never reported.
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// A currently-online user, as exposed by the online-users listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUser {
    /// User ID.
    pub user_id: UserId,
    /// Best status across the user's fresh sessions (`Active` beats `Idle`).
    pub status: PresenceStatus,
    /// Server-side time of the most recent report.
    pub last_seen_at: DateTime<Utc>,
}
