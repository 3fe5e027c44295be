//! Local filesystem storage backend.

use crate::traits::{validate_component, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage: one subdirectory per server under a fixed root.
#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance rooted at `root`, creating the
    /// directory if it does not exist.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::Config(format!(
                "Failed to create storage root {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalStorage { root })
    }

    fn server_dir(&self, server_id: &str) -> StorageResult<PathBuf> {
        validate_component(server_id)?;
        Ok(self.root.join(server_id))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn save_file(
        &self,
        server_id: &str,
        filename: &str,
        content: Bytes,
    ) -> StorageResult<()> {
        let dir = self.server_dir(server_id)?;
        validate_component(filename)?;

        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to create server dir {}: {}",
                dir.display(),
                e
            ))
        })?;

        let path = dir.join(filename);
        let size = content.len();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&content).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            server_id = %server_id,
            filename = %filename,
            size_bytes = size,
            "Local storage save successful"
        );

        Ok(())
    }

    async fn list_servers(&self) -> StorageResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await.map_err(|e| {
            StorageError::ListFailed(format!(
                "Failed to read storage root {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut servers = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if !file_type.is_dir() {
                continue;
            }
            servers.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(servers)
    }

    async fn list_server_files(&self, server_id: &str) -> StorageResult<Vec<String>> {
        let dir = self.server_dir(server_id)?;

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::ServerNotFound(server_id.to_string()));
            }
            Err(e) => {
                return Err(StorageError::ListFailed(format!(
                    "Failed to read server dir {}: {}",
                    dir.display(),
                    e
                )));
            }
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                continue;
            }
            files.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(files)
    }
}
