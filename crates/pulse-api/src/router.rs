//! Route definitions for the Pulse HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(presence_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Presence report, query, and online listing. The literal `/online`
/// segment takes precedence over the `{user_id}` capture.
fn presence_routes() -> Router<AppState> {
    Router::new()
        .route("/presence/report", post(handlers::presence::report))
        .route("/presence/online", get(handlers::presence::online_users))
        .route("/presence/{user_id}", get(handlers::presence::query))
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
