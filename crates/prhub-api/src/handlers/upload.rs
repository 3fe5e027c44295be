//! Upload path: authorize against the license service, derive the server
//! identity, and persist the demo file.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use bytes::Bytes;
use prhub_core::{derive_server_id, AppError};
use prhub_services::LicenseError;
use serde::Serialize;
use std::sync::Arc;

/// Multipart form field carrying the demo file.
const DEMO_FIELD: &str = "prdemo";

const HEADER_IP: &str = "x-prhub-ip";
const HEADER_PORT: &str = "x-prhub-port";
const HEADER_LICENSE: &str = "x-prhub-license";

#[derive(Debug, Serialize)]
pub struct UploadedServer {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub server: UploadedServer,
    pub file: UploadedFile,
}

/// `POST /upload`: store one demo file for the server identified by the
/// license key in the request headers.
///
/// Authorization happens before anything touches storage: all three headers
/// must be present and the license must pass the external validation call.
/// Validator transport failures deny the upload exactly like an invalid
/// license; the distinction exists only in the logs.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    let (ip, port, license) = match (
        header_value(&headers, HEADER_IP),
        header_value(&headers, HEADER_PORT),
        header_value(&headers, HEADER_LICENSE),
    ) {
        (Some(ip), Some(port), Some(license)) => (ip, port, license),
        _ => {
            return Err(
                AppError::Unauthorized("Missing authorization headers".to_string()).into(),
            )
        }
    };

    match state.validator.validate(&ip, &port, &license).await {
        Ok(validation) if validation.valid => {}
        Ok(_) => {
            tracing::warn!(ip = %ip, port = %port, "License rejected by validation service");
            return Err(AppError::Unauthorized("Invalid license".to_string()).into());
        }
        Err(err @ LicenseError::Service { .. }) => {
            tracing::warn!(error = %err, ip = %ip, port = %port, "License validation refused");
            return Err(AppError::Unauthorized(err.to_string()).into());
        }
        Err(err) => {
            tracing::error!(error = %err, "License validation call failed");
            return Err(AppError::Unauthorized(err.to_string()).into());
        }
    }

    let server_id = derive_server_id(&state.config.namespace, &license);

    let (filename, content) = read_demo_field(&mut multipart).await?;
    let size = content.len();

    state
        .storage
        .save_file(&server_id, &filename, content)
        .await
        .map_err(HttpAppError::from)?;

    tracing::info!(
        server_id = %server_id,
        filename = %filename,
        size_bytes = size,
        "Demo upload stored"
    );

    let url = state.file_url(&server_id, &filename);
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            server: UploadedServer { id: server_id },
            file: UploadedFile {
                name: filename,
                url,
            },
        }),
    ))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .filter(|value| !value.is_empty())
}

/// Pull the demo attachment out of the multipart body. A missing or
/// unreadable attachment surfaces as an internal error, the behavior
/// existing uploaders observe.
async fn read_demo_field(multipart: &mut Multipart) -> Result<(String, Bytes), HttpAppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read multipart form: {}", e)))?
    {
        if field.name() != Some(DEMO_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::Internal("Demo attachment has no filename".to_string()))?;

        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read demo attachment: {}", e)))?;

        return Ok((filename, content));
    }

    Err(AppError::Internal(format!("Missing '{}' form field", DEMO_FIELD)).into())
}
