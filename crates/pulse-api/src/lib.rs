//! # pulse-api
//!
//! HTTP API layer for the Pulse presence store service, built on Axum.
//!
//! Exposes the store contract (`report` / `query`), the online-users
//! listing, a health endpoint, and the error mapping from [`AppError`]
//! to HTTP responses.
//!
//! [`AppError`]: pulse_core::error::AppError

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
