//! Application setup and initialization
//!
//! Initialization logic extracted from main.rs for better organization and
//! testability.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use prhub_core::Config;
use prhub_services::LicenseValidator;
use prhub_storage::create_storage;
use std::sync::Arc;
use std::time::Duration;

/// Initialize the application state and router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration before touching any backend.
    config.validate().context("Configuration validation failed")?;

    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;

    let validator = LicenseValidator::new(
        config.license_endpoint.clone(),
        Duration::from_secs(config.license_timeout_secs),
    )
    .context("Failed to build license validation client")?;

    let state = Arc::new(AppState {
        config,
        storage,
        validator,
    });

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
