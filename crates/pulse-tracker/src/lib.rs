//! # pulse-tracker
//!
//! Client-side presence tracking for one authenticated session. Observes
//! activity and visibility signals, runs a three-state liveness machine
//! (active / idle / offline), and keeps a remote presence store fresh
//! with periodic heartbeats and event-driven reports.
//!
//! The state logic lives in [`machine`] as pure transition functions over
//! [`machine::PresenceState`]; the timer/listener layer in [`tracker`]
//! only feeds trigger events in, so the machine tests without a real
//! clock.

pub mod context;
pub mod machine;
pub mod signal;
pub mod tracker;

pub use context::SessionContext;
pub use signal::Signal;
pub use tracker::PresenceTracker;
