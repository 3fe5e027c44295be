//! Configuration module
//!
//! Flat configuration record read once at startup from the environment
//! (optionally seeded from a `.env` file). The struct is passed explicitly
//! into constructors; there are no process-wide configuration globals.

use std::env;

use uuid::Uuid;

use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_LICENSE_ENDPOINT: &str = "http://www.realitymod.com/forum/lcp_validate.php";
const DEFAULT_LICENSE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 100;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Namespace UUID scoping server-ID derivation. Different deployments
    /// configure different namespaces and so produce disjoint ID spaces.
    pub namespace: Uuid,
    pub storage_backend: StorageBackend,
    /// Root directory for the local backend.
    pub upload_dir: Option<String>,
    /// Base URL that uploaded files are served under; file URLs in API
    /// responses are constructed from it.
    pub public_base_url: String,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, Spaces, ...).
    pub s3_endpoint: Option<String>,
    pub license_endpoint: String,
    pub license_timeout_secs: u64,
    pub max_upload_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let namespace = env::var("NAMESPACE_UUID")
            .map_err(|_| anyhow::anyhow!("NAMESPACE_UUID must be set"))?
            .parse::<Uuid>()
            .map_err(|_| anyhow::anyhow!("NAMESPACE_UUID must be a valid UUID"))?;

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StorageBackend::Local,
            "s3" => StorageBackend::S3,
            other => {
                return Err(anyhow::anyhow!(
                    "STORAGE_BACKEND must be 'local' or 's3', got '{}'",
                    other
                ))
            }
        };

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

        let config = Config {
            server_port,
            namespace,
            storage_backend,
            upload_dir: env::var("UPLOAD_DIR").ok(),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .map_err(|_| anyhow::anyhow!("PUBLIC_BASE_URL must be set"))?,
            s3_region: env::var("S3_REGION").ok().or(env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            license_endpoint: env::var("LICENSE_VALIDATION_URL")
                .unwrap_or_else(|_| DEFAULT_LICENSE_ENDPOINT.to_string()),
            license_timeout_secs: env::var("LICENSE_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_LICENSE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_LICENSE_TIMEOUT_SECS),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.public_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("PUBLIC_BASE_URL must not be empty"));
        }

        match self.storage_backend {
            StorageBackend::Local => {
                if self.upload_dir.is_none() {
                    return Err(anyhow::anyhow!(
                        "UPLOAD_DIR must be set when using the local storage backend"
                    ));
                }
            }
            StorageBackend::S3 => {
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using the S3 storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 4000,
            namespace: Uuid::nil(),
            storage_backend: StorageBackend::Local,
            upload_dir: Some("/tmp/prhub".to_string()),
            public_base_url: "http://localhost:4000/demos".to_string(),
            s3_region: None,
            s3_endpoint: None,
            license_endpoint: DEFAULT_LICENSE_ENDPOINT.to_string(),
            license_timeout_secs: DEFAULT_LICENSE_TIMEOUT_SECS,
            max_upload_size_bytes: 100 * 1024 * 1024,
        }
    }

    #[test]
    fn local_backend_requires_upload_dir() {
        let mut config = base_config();
        config.upload_dir = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn s3_backend_requires_region() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::S3;
        config.upload_dir = None;
        assert!(config.validate().is_err());

        config.s3_region = Some("us-east-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn valid_local_config_passes() {
        assert!(base_config().validate().is_ok());
    }
}
