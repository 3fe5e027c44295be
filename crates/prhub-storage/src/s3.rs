//! S3 bucket storage backend.
//!
//! Each server maps to one bucket named `prhub-server-{server_id}`; the
//! bucket is created lazily on the first write for that server. Works
//! against AWS or any S3-compatible provider via a custom endpoint.

use crate::traits::{validate_component, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use bytes::Bytes;

/// Fixed prefix distinguishing hub-managed buckets from everything else in
/// the account.
const BUCKET_NAME_PREFIX: &str = "prhub-server";

/// S3 storage implementation, one bucket per server.
#[derive(Clone)]
pub struct BucketStorage {
    client: Client,
    region: String,
}

impl BucketStorage {
    /// Create a new BucketStorage instance.
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()));

        if let Some(ref endpoint) = endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let sdk_config = loader.load().await;

        // S3-compatible providers generally only support path-style addressing.
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if endpoint_url.is_some() {
            builder = builder.force_path_style(true);
        }

        Ok(BucketStorage {
            client: Client::from_conf(builder.build()),
            region,
        })
    }

    fn bucket_name(server_id: &str) -> String {
        format!("{}-{}", BUCKET_NAME_PREFIX, server_id)
    }

    fn server_id_from_bucket(bucket: &str) -> Option<&str> {
        bucket
            .strip_prefix(BUCKET_NAME_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
    }

    async fn ensure_bucket(&self, bucket: &str) -> StorageResult<()> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => return Ok(()),
            Err(err) => {
                let missing = err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false);
                if !missing {
                    return Err(StorageError::WriteFailed(format!(
                        "Failed to check if bucket {} exists: {}",
                        bucket, err
                    )));
                }
            }
        }

        let mut request = self.client.create_bucket().bucket(bucket);
        // us-east-1 is the default location and must not be sent as a constraint.
        if self.region != "us-east-1" {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }

        request.send().await.map_err(|err| {
            StorageError::WriteFailed(format!("Failed to create bucket {}: {}", bucket, err))
        })?;

        tracing::info!(bucket = %bucket, "Created server bucket");
        Ok(())
    }
}

#[async_trait]
impl Storage for BucketStorage {
    async fn save_file(
        &self,
        server_id: &str,
        filename: &str,
        content: Bytes,
    ) -> StorageResult<()> {
        validate_component(server_id)?;
        validate_component(filename)?;

        let bucket = Self::bucket_name(server_id);
        let size = content.len();

        self.ensure_bucket(&bucket).await?;

        self.client
            .put_object()
            .bucket(&bucket)
            .key(filename)
            .body(ByteStream::from(content))
            .send()
            .await
            .map_err(|err| {
                StorageError::WriteFailed(format!(
                    "Failed to upload {} to bucket {}: {}",
                    filename, bucket, err
                ))
            })?;

        tracing::info!(
            bucket = %bucket,
            filename = %filename,
            size_bytes = size,
            "S3 storage save successful"
        );

        Ok(())
    }

    async fn list_servers(&self) -> StorageResult<Vec<String>> {
        let output = self.client.list_buckets().send().await.map_err(|err| {
            StorageError::ListFailed(format!("Failed to list buckets: {}", err))
        })?;

        let mut servers = Vec::new();
        for bucket in output.buckets() {
            if let Some(server_id) = bucket.name().and_then(Self::server_id_from_bucket) {
                servers.push(server_id.to_string());
            }
        }

        Ok(servers)
    }

    async fn list_server_files(&self, server_id: &str) -> StorageResult<Vec<String>> {
        validate_component(server_id)?;

        let bucket = Self::bucket_name(server_id);
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&bucket)
            .into_paginator()
            .send();

        let mut files = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|err| {
                // A server that never uploaded has no bucket yet; surface
                // that as the same "server not found" the local backend uses.
                let no_such_bucket = err
                    .as_service_error()
                    .map(|e| e.is_no_such_bucket())
                    .unwrap_or(false);
                if no_such_bucket {
                    StorageError::ServerNotFound(server_id.to_string())
                } else {
                    StorageError::ListFailed(format!(
                        "Failed to list objects in bucket {}: {}",
                        bucket, err
                    ))
                }
            })?;

            for object in page.contents() {
                if let Some(key) = object.key() {
                    files.push(key.to_string());
                }
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_name_carries_fixed_prefix() {
        assert_eq!(
            BucketStorage::bucket_name("0b0836cd-7089-3312-9f74-9e8f8ef08e82"),
            "prhub-server-0b0836cd-7089-3312-9f74-9e8f8ef08e82"
        );
    }

    #[test]
    fn server_id_roundtrips_through_bucket_name() {
        let id = "0b0836cd-7089-3312-9f74-9e8f8ef08e82";
        let bucket = BucketStorage::bucket_name(id);
        assert_eq!(BucketStorage::server_id_from_bucket(&bucket), Some(id));
    }

    #[test]
    fn foreign_buckets_are_ignored() {
        assert_eq!(BucketStorage::server_id_from_bucket("some-other-bucket"), None);
        assert_eq!(BucketStorage::server_id_from_bucket("prhub-serverless"), None);
        assert_eq!(BucketStorage::server_id_from_bucket("prhub-server"), None);
    }
}
