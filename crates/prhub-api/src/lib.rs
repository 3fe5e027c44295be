//! PRHub API Library
//!
//! This crate provides the HTTP handlers, application state, and setup for
//! the demo upload hub.

pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
