//! Route configuration and setup.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    let max_body = state.config.max_upload_size_bytes;

    Router::new()
        .route(
            &format!("{}/servers", API_PREFIX),
            get(handlers::servers::list_servers),
        )
        .route(
            &format!("{}/servers/{{server}}", API_PREFIX),
            get(handlers::servers::server_files),
        )
        .route(
            &format!("{}/upload", API_PREFIX),
            post(handlers::upload::upload_file),
        )
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
