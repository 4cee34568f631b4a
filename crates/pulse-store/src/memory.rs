//! In-memory presence store.
//!
//! This is the reference backend used by the store service. It keeps one
//! record per (user, session) and derives everything else at query time:
//! a session counts as online only if its latest report claims online
//! *and* arrived within the staleness window, and a user is online if any
//! of their sessions is.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use pulse_core::config::store::StoreConfig;
use pulse_core::presence::{OnlineUser, PresenceQueryResult, PresenceReport, PresenceStatus};
use pulse_core::result::AppResult;
use pulse_core::types::{SessionId, UserId};

use crate::client::PresenceStore;

/// Last-reported state of one client session, stamped with the store's
/// own clock. Client timestamps never drive staleness.
#[derive(Debug, Clone, Copy)]
struct SessionRecord {
    status: PresenceStatus,
    last_report_at: DateTime<Utc>,
}

/// In-memory presence store with query-time staleness.
#[derive(Debug)]
pub struct MemoryPresenceStore {
    /// User ID → per-session records. Entry access serializes conflicting
    /// writes for the same user.
    records: DashMap<UserId, HashMap<SessionId, SessionRecord>>,
    staleness_window: chrono::Duration,
}

impl MemoryPresenceStore {
    /// Create a store from configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            records: DashMap::new(),
            staleness_window: chrono::Duration::milliseconds(config.staleness_window_ms as i64),
        }
    }

    /// Apply a report at an explicit receive time. Split out from the
    /// trait method so staleness behavior is testable without a clock.
    pub fn apply_report(&self, report: &PresenceReport, received_at: DateTime<Utc>) {
        let mut sessions = self.records.entry(report.user_id).or_default();
        sessions.insert(
            report.session_id,
            SessionRecord {
                status: report.status,
                last_report_at: received_at,
            },
        );
    }

    /// Resolve a subject's presence as of `now`.
    pub fn query_at(&self, subject: UserId, now: DateTime<Utc>) -> PresenceQueryResult {
        let Some(sessions) = self.records.get(&subject) else {
            return PresenceQueryResult {
                is_online: false,
                last_seen_at: None,
            };
        };

        let last_seen_at = sessions.values().map(|r| r.last_report_at).max();
        let is_online = sessions
            .values()
            .any(|r| r.status.is_online() && now - r.last_report_at <= self.staleness_window);

        PresenceQueryResult {
            is_online,
            last_seen_at,
        }
    }

    /// All users with at least one fresh online session as of `now`.
    ///
    /// Each entry carries the best status across fresh sessions, so
    /// consumers wanting finer granularity than `is_online` can read it.
    pub fn online_users_at(&self, now: DateTime<Utc>) -> Vec<OnlineUser> {
        self.records
            .iter()
            .filter_map(|entry| {
                let fresh: Vec<&SessionRecord> = entry
                    .value()
                    .values()
                    .filter(|r| r.status.is_online() && now - r.last_report_at <= self.staleness_window)
                    .collect();

                let best = fresh
                    .iter()
                    .map(|r| r.status)
                    .find(|s| *s == PresenceStatus::Active)
                    .or_else(|| fresh.first().map(|r| r.status))?;
                let last_seen_at = fresh.iter().map(|r| r.last_report_at).max()?;

                Some(OnlineUser {
                    user_id: *entry.key(),
                    status: best,
                    last_seen_at,
                })
            })
            .collect()
    }

    /// Drop per-session records whose last report is older than the
    /// staleness window. Queries are already correct without this; it
    /// only bounds memory for long-running services.
    pub fn evict_stale(&self, now: DateTime<Utc>) -> usize {
        let mut evicted = 0;
        self.records.retain(|user_id, sessions| {
            let before = sessions.len();
            sessions.retain(|_, r| now - r.last_report_at <= self.staleness_window);
            let dropped = before - sessions.len();
            if dropped > 0 {
                evicted += dropped;
                debug!("Evicted {} stale session(s) for user {}", dropped, user_id);
            }
            !sessions.is_empty()
        });
        evicted
    }
}

#[async_trait]
impl PresenceStore for MemoryPresenceStore {
    async fn report(&self, report: PresenceReport) -> AppResult<()> {
        debug!(
            "Presence report: user={} session={} status={}",
            report.user_id,
            report.session_id,
            report.status.as_str()
        );
        self.apply_report(&report, Utc::now());
        Ok(())
    }

    async fn query(&self, subject: UserId) -> AppResult<PresenceQueryResult> {
        Ok(self.query_at(subject, Utc::now()))
    }
}
