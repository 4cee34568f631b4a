//! Session context passed into the tracker at start.
//!
//! The caller owns the context's lifetime; the tracker never reaches for
//! ambient global state to find out whose presence it is reporting.

use pulse_core::error::AppError;
use pulse_core::result::AppResult;
use pulse_core::types::{SessionId, UserId};

/// Identity of the session a tracker reports for.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    /// The authenticated user.
    pub user_id: UserId,
    /// This tab/window. Concurrent tabs for the same user each carry a
    /// distinct session ID and run an independent tracker.
    pub session_id: SessionId,
}

impl SessionContext {
    /// Context for a brand-new session of `user_id`.
    pub fn new_session(user_id: UserId) -> Self {
        Self {
            user_id,
            session_id: SessionId::new(),
        }
    }

    /// Precondition check for `start`: a nil user identity is never valid.
    pub fn validate(&self) -> AppResult<()> {
        if self.user_id.is_nil() {
            return Err(AppError::validation(
                "Session context requires a non-empty user identity",
            ));
        }
        if self.session_id.is_nil() {
            return Err(AppError::validation(
                "Session context requires a non-empty session identity",
            ));
        }
        Ok(())
    }
}
