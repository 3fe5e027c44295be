//! Error types module
//!
//! Application-level errors are unified under the [`AppError`] enum. Each
//! variant self-describes its HTTP presentation through [`ErrorMetadata`]:
//! status code, machine-readable code, client-facing message, and the level
//! it should be logged at. Detail stays in server-side logs; clients get a
//! generic status-coded message.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like input validation failures
    Debug,
    /// Warning level - for rejected authorization attempts
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error is presented over HTTP.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Unauthorized(_) => 401,
            AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Storage(_) => 500,
            AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            // Authorization failures are deliberately opaque: an invalid
            // license and a validator outage look identical to the caller.
            AppError::Unauthorized(_) => "Unauthorized".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Storage(_) => "Internal Server Error".to_string(),
            AppError::Internal(_) => "Internal Server Error".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Unauthorized(_) => LogLevel::Warn,
            AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::NotFound(_) => LogLevel::Debug,
            AppError::Storage(_) => LogLevel::Error,
            AppError::Internal(_) => LogLevel::Error,
        }
    }
}
