//! PRHub Core Library
//!
//! This crate provides the configuration, error types, and server identity
//! derivation shared across all PRHub components.

pub mod config;
pub mod error;
pub mod server_id;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use server_id::derive_server_id;
pub use storage_types::StorageBackend;
