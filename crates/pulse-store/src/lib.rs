//! # pulse-store
//!
//! The presence store contract and its implementations:
//!
//! - [`PresenceStore`]: the trait every store backend implements
//! - [`MemoryPresenceStore`]: in-memory backend with the server-side
//!   staleness policy and multi-session aggregation
//! - [`HttpPresenceStore`]: reqwest client for a remote store service

pub mod client;
pub mod http;
pub mod memory;

pub use client::PresenceStore;
pub use http::HttpPresenceStore;
pub use memory::MemoryPresenceStore;
