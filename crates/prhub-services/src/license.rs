//! Client for the external license validation endpoint.
//!
//! One blocking call per upload request: no retries, no caching of results.
//! A failure here fails the enclosing request.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// License validation errors.
///
/// `Service` is the validation authority rejecting the request with a coded
/// error body; `Transport` and `Malformed` are failures to complete or
/// interpret the call at all. Callers that conflate these in their responses
/// should still log them distinctly.
#[derive(Debug, Error)]
pub enum LicenseError {
    #[error("License error: {code} - {message}")]
    Service { code: i64, message: String },

    #[error("Validation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed validation response: {0}")]
    Malformed(String),
}

/// Successful validation verdict. Valid only for the duration of one request;
/// never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Validation {
    #[serde(rename = "Valid")]
    pub valid: bool,
    #[serde(rename = "User")]
    pub user: String,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(rename = "ErrorCode")]
    code: i64,
    #[serde(rename = "ErrorMsg")]
    message: String,
}

/// HTTP client for the license validation endpoint.
#[derive(Clone)]
pub struct LicenseValidator {
    client: reqwest::Client,
    endpoint: String,
}

impl LicenseValidator {
    /// Create a new LicenseValidator.
    ///
    /// # Arguments
    /// * `endpoint` - Validation endpoint URL
    /// * `timeout` - Bound on each validation call, connect included
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, LicenseError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Perform a single validation call for a game server's connection
    /// parameters. Inputs must be non-empty; the caller rejects empty values
    /// before invoking this.
    ///
    /// A 200 response carries `{"Valid": bool, "User": string}`; any other
    /// status carries `{"ErrorCode": int, "ErrorMsg": string}` and maps to
    /// [`LicenseError::Service`].
    pub async fn validate(
        &self,
        ip: &str,
        port: &str,
        license_key: &str,
    ) -> Result<Validation, LicenseError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "server"),
                ("game", "prbf2"),
                ("key", license_key),
                ("ip", ip),
                ("port", port),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            let err: ServiceErrorBody = serde_json::from_str(&body)
                .map_err(|e| LicenseError::Malformed(e.to_string()))?;
            return Err(LicenseError::Service {
                code: err.code,
                message: err.message,
            });
        }

        let validation: Validation =
            serde_json::from_str(&body).map_err(|e| LicenseError::Malformed(e.to_string()))?;

        tracing::debug!(
            valid = validation.valid,
            user = %validation.user,
            "License validation response received"
        );

        Ok(validation)
    }
}
