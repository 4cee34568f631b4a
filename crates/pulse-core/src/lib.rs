//! # pulse-core
//!
//! Core crate for Pulse. Contains configuration schemas, typed
//! identifiers, the presence wire types shared by the tracker, the store,
//! and the API, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Pulse crates.

pub mod config;
pub mod error;
pub mod presence;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
