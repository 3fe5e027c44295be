//! Config-driven backend selection.

use crate::{BucketStorage, LocalStorage, Storage, StorageError, StorageResult};
use prhub_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackend::Local => {
            let root = config
                .upload_dir
                .clone()
                .ok_or_else(|| StorageError::Config("UPLOAD_DIR not configured".to_string()))?;

            let storage = LocalStorage::new(root).await?;
            Ok(Arc::new(storage))
        }

        StorageBackend::S3 => {
            let region = config.s3_region.clone().ok_or_else(|| {
                StorageError::Config("S3_REGION or AWS_REGION not configured".to_string())
            })?;

            let storage = BucketStorage::new(region, config.s3_endpoint.clone()).await?;
            Ok(Arc::new(storage))
        }
    }
}
