//! HTTP client for a remote presence store service.
//!
//! Speaks the `pulse-api` wire contract. Network failures map to
//! [`ErrorKind::ExternalService`] and are expected to be swallowed by the
//! tracker (deferred to its next heartbeat), never bubbled to a user.
//!
//! [`ErrorKind::ExternalService`]: pulse_core::error::ErrorKind::ExternalService

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use pulse_core::config::store::StoreConfig;
use pulse_core::error::AppError;
use pulse_core::presence::{PresenceQueryResult, PresenceReport};
use pulse_core::result::AppResult;
use pulse_core::types::UserId;

use crate::client::PresenceStore;

/// Response envelope of the store service. Mirrors the API's
/// `ApiResponse` / `ApiErrorResponse` without depending on the API crate.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// Presence store backend that reports to a remote service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPresenceStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPresenceStore {
    /// Create a client for the store service at `base_url`
    /// (e.g. `http://presence.internal:8080`).
    pub fn new(base_url: impl Into<String>, config: &StoreConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    pulse_core::error::ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn unwrap_envelope<T>(envelope: Envelope<T>) -> AppResult<T> {
        if envelope.success {
            envelope
                .data
                .ok_or_else(|| AppError::external_service("Store response missing data"))
        } else {
            let message = envelope
                .message
                .unwrap_or_else(|| "unknown store error".to_string());
            Err(AppError::external_service(format!(
                "Store rejected request: {message}"
            )))
        }
    }
}

#[async_trait]
impl PresenceStore for HttpPresenceStore {
    async fn report(&self, report: PresenceReport) -> AppResult<()> {
        let url = format!("{}/api/presence/report", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&report)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("Presence report failed to send: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Presence report rejected with status {}",
                response.status()
            )));
        }

        debug!(
            "Reported presence for session {} ({})",
            report.session_id,
            report.status.as_str()
        );
        Ok(())
    }

    async fn query(&self, subject: UserId) -> AppResult<PresenceQueryResult> {
        let url = format!("{}/api/presence/{}", self.base_url, subject);
        let envelope: Envelope<PresenceQueryResult> = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Presence query failed: {e}")))?
            .json()
            .await
            .map_err(|e| {
                AppError::external_service(format!("Presence query returned bad JSON: {e}"))
            })?;

        Self::unwrap_envelope(envelope)
    }
}
