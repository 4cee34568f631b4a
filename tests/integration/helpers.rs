//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use pulse_api::{AppState, build_router};
use pulse_core::config::AppConfig;
use pulse_core::config::tracker::TrackerConfig;
use pulse_core::error::AppError;
use pulse_core::presence::{PresenceQueryResult, PresenceReport, PresenceStatus};
use pulse_core::result::AppResult;
use pulse_core::types::UserId;
use pulse_store::PresenceStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared application state (store access for direct assertions)
    pub state: AppState,
}

/// A response from the test app
pub struct TestResponse {
    pub status: StatusCode,
    pub json: Value,
}

impl TestApp {
    /// Create a new test application with an in-memory store
    pub fn new() -> Self {
        let state = AppState::new(AppConfig::default());
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Make a request against the router
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response was not JSON")
        };

        TestResponse { status, json }
    }
}

/// Fake presence store that records every report it receives.
///
/// `fail_next` injects exactly one transient failure, for asserting that
/// the tracker defers retries to the next heartbeat.
#[derive(Debug, Default)]
pub struct RecordingStore {
    reports: Mutex<Vec<PresenceReport>>,
    fail_next: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Everything reported so far, in arrival order.
    pub fn reports(&self) -> Vec<PresenceReport> {
        self.reports.lock().unwrap().clone()
    }

    /// Just the statuses, in arrival order.
    pub fn statuses(&self) -> Vec<PresenceStatus> {
        self.reports().iter().map(|r| r.status).collect()
    }

    /// Make the next report fail with a transient error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PresenceStore for RecordingStore {
    async fn report(&self, report: PresenceReport) -> AppResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::external_service("injected transient failure"));
        }
        self.reports.lock().unwrap().push(report);
        Ok(())
    }

    async fn query(&self, _subject: UserId) -> AppResult<PresenceQueryResult> {
        Ok(PresenceQueryResult {
            is_online: false,
            last_seen_at: None,
        })
    }
}

/// Tracker config with millisecond-scale knobs for paused-clock tests.
pub fn tracker_config(
    heartbeat_ms: u64,
    idle_ms: u64,
    offline_ms: u64,
    grace_ms: u64,
    debounce_ms: u64,
) -> TrackerConfig {
    TrackerConfig {
        heartbeat_interval_ms: heartbeat_ms,
        idle_threshold_ms: idle_ms,
        offline_threshold_ms: offline_ms,
        hidden_grace_period_ms: grace_ms,
        sync_debounce_ms: debounce_ms,
    }
}
