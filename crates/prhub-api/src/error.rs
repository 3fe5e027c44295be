//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain errors
//! convert into `HttpAppError` so they render consistently: status and code
//! from [`ErrorMetadata`], a JSON body with the client-facing message, and a
//! server-side log line at the error's level.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use prhub_core::{AppError, ErrorMetadata, LogLevel};
use prhub_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from prhub-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = error.error_code(), "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = error.error_code(), "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = error.error_code(), "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::ServerNotFound(_) => {
                AppError::NotFound("Server doesn't exist".to_string())
            }
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::WriteFailed(msg) => AppError::Storage(msg),
            StorageError::ListFailed(msg) => AppError::Storage(msg),
            StorageError::Io(err) => AppError::Storage(format!("IO error: {}", err)),
            StorageError::Config(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}
