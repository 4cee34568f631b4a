//! Presence store trait for pluggable backends.

use async_trait::async_trait;

use pulse_core::presence::{PresenceQueryResult, PresenceReport};
use pulse_core::result::AppResult;
use pulse_core::types::UserId;

/// Trait for presence store backends (in-memory or remote).
///
/// Reports are applied in arrival order per session; the store owns the
/// staleness policy (grace window after the last report before a session
/// is deemed offline), so clients never compute it.
#[async_trait]
pub trait PresenceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Record a status report from one client session. Idempotent and
    /// safe to retry.
    async fn report(&self, report: PresenceReport) -> AppResult<()>;

    /// Resolve a subject's presence across all of their sessions.
    async fn query(&self, subject: UserId) -> AppResult<PresenceQueryResult>;
}
