//! Contract tests for the presence store: multi-session aggregation and
//! the server-side staleness window, asserted through the
//! [`PresenceStore`] trait the tracker programs against.

use chrono::{Duration, Utc};

use pulse_core::config::store::StoreConfig;
use pulse_core::presence::{PresenceReport, PresenceStatus};
use pulse_core::types::{SessionId, UserId};
use pulse_store::{MemoryPresenceStore, PresenceStore};

fn store() -> MemoryPresenceStore {
    MemoryPresenceStore::new(&StoreConfig::default())
}

#[tokio::test]
async fn test_report_then_query_roundtrip() {
    let store = store();
    let user = UserId::new();

    store
        .report(PresenceReport::now(user, SessionId::new(), PresenceStatus::Active))
        .await
        .unwrap();

    let result = store.query(user).await.unwrap();
    assert!(result.is_online);
    assert!(result.last_seen_at.is_some());
}

#[tokio::test]
async fn test_user_with_one_live_tab_stays_online() {
    // Tab A goes offline while tab B remains active: any active session
    // keeps the user online.
    let store = store();
    let user = UserId::new();
    let tab_a = SessionId::new();
    let tab_b = SessionId::new();

    store
        .report(PresenceReport::now(user, tab_a, PresenceStatus::Active))
        .await
        .unwrap();
    store
        .report(PresenceReport::now(user, tab_b, PresenceStatus::Active))
        .await
        .unwrap();
    store
        .report(PresenceReport::now(user, tab_a, PresenceStatus::Offline))
        .await
        .unwrap();

    assert!(store.query(user).await.unwrap().is_online);

    // Once B leaves too, the user is offline.
    store
        .report(PresenceReport::now(user, tab_b, PresenceStatus::Offline))
        .await
        .unwrap();
    assert!(!store.query(user).await.unwrap().is_online);
}

#[tokio::test]
async fn test_silent_session_goes_stale() {
    // A session that stops reporting flips offline after the staleness
    // window, no matter what it last claimed.
    let store = store();
    let user = UserId::new();
    let reported_at = Utc::now();

    store.apply_report(
        &PresenceReport::now(user, SessionId::new(), PresenceStatus::Active),
        reported_at,
    );

    let within_window = reported_at + Duration::milliseconds(89_000);
    assert!(store.query_at(user, within_window).is_online);

    let past_window = reported_at + Duration::milliseconds(91_000);
    let result = store.query_at(user, past_window);
    assert!(!result.is_online);
    assert_eq!(result.last_seen_at, Some(reported_at));
}

#[tokio::test]
async fn test_query_result_drives_indicator() {
    let store = store();
    let viewer_subject = UserId::new();

    // Nothing reported: no badge by default, gray badge on request.
    let query = store.query(viewer_subject).await.unwrap();
    assert!(pulse_indicator::render(pulse_indicator::IndicatorProps::from_query(&query)).is_none());
    let badge = pulse_indicator::render(
        pulse_indicator::IndicatorProps::from_query(&query).show_offline(true),
    )
    .unwrap();
    assert_eq!(badge.label, "Offline");

    // After a report: pulsing online badge.
    store
        .report(PresenceReport::now(
            viewer_subject,
            SessionId::new(),
            PresenceStatus::Active,
        ))
        .await
        .unwrap();
    let query = store.query(viewer_subject).await.unwrap();
    let badge =
        pulse_indicator::render(pulse_indicator::IndicatorProps::from_query(&query)).unwrap();
    assert_eq!(badge.label, "Active now");
    assert!(badge.pulse);
}

#[tokio::test]
async fn test_last_seen_tracks_newest_session() {
    let store = store();
    let user = UserId::new();
    let t0 = Utc::now();

    store.apply_report(
        &PresenceReport::now(user, SessionId::new(), PresenceStatus::Active),
        t0,
    );
    store.apply_report(
        &PresenceReport::now(user, SessionId::new(), PresenceStatus::Idle),
        t0 + Duration::seconds(30),
    );

    let result = store.query_at(user, t0 + Duration::seconds(31));
    assert_eq!(result.last_seen_at, Some(t0 + Duration::seconds(30)));
}
