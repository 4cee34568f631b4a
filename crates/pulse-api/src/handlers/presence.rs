//! Presence report and query handlers.

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;

use pulse_core::presence::{OnlineUser, PresenceQueryResult, PresenceReport};
use pulse_core::types::UserId;

use crate::dto::response::{ApiResponse, ReportAck};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/presence/report
///
/// Records one session's status report. The store stamps its own receive
/// time; the client's `reported_at` is diagnostic only.
pub async fn report(
    State(state): State<AppState>,
    Json(report): Json<PresenceReport>,
) -> Result<Json<ApiResponse<ReportAck>>, ApiError> {
    if report.user_id.is_nil() || report.session_id.is_nil() {
        return Err(ApiError(pulse_core::error::AppError::validation(
            "Presence report requires non-nil user and session identities",
        )));
    }

    let session_id = report.session_id;
    state.store.apply_report(&report, Utc::now());

    Ok(Json(ApiResponse::ok(ReportAck {
        session_id: session_id.into_uuid(),
    })))
}

/// GET /api/presence/{user_id}
///
/// Resolves the subject's presence across all of their sessions. The
/// staleness window lives here, server-side: a session that stopped
/// reporting is offline no matter what it last claimed.
pub async fn query(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Json<ApiResponse<PresenceQueryResult>> {
    Json(ApiResponse::ok(state.store.query_at(user_id, Utc::now())))
}

/// GET /api/presence/online
///
/// Lists users with at least one fresh online session, carrying the raw
/// status for consumers that distinguish active from idle.
pub async fn online_users(State(state): State<AppState>) -> Json<ApiResponse<Vec<OnlineUser>>> {
    Json(ApiResponse::ok(state.store.online_users_at(Utc::now())))
}
