//! Read API: enumerate servers and their uploaded files.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use prhub_core::AppError;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ServerEntry {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ServersResponse {
    pub servers: Vec<ServerEntry>,
}

#[derive(Debug, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ServerFilesResponse {
    pub files: Vec<FileEntry>,
}

/// `GET /servers`: all known servers. An empty storage root yields an empty
/// list, not an error.
pub async fn list_servers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ServersResponse>, HttpAppError> {
    let servers = state
        .storage
        .list_servers()
        .await
        .map_err(HttpAppError::from)?
        .into_iter()
        .map(|id| ServerEntry { id })
        .collect();

    Ok(Json(ServersResponse { servers }))
}

/// `GET /servers/{server}`: one server's files with their public URLs.
pub async fn server_files(
    State(state): State<Arc<AppState>>,
    Path(server): Path<String>,
) -> Result<Json<ServerFilesResponse>, HttpAppError> {
    if server.trim().is_empty() {
        return Err(AppError::InvalidInput("Missing server identifier".to_string()).into());
    }

    let files = state
        .storage
        .list_server_files(&server)
        .await
        .map_err(HttpAppError::from)?
        .into_iter()
        .map(|name| FileEntry {
            url: state.file_url(&server, &name),
            name,
        })
        .collect();

    Ok(Json(ServerFilesResponse { files }))
}
