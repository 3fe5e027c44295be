//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement, plus the shared error type.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Server not found: {0}")]
    ServerNotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Listing failed: {0}")]
    ListFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Backends persist uploaded demo files under a per-server namespace. The
/// HTTP layer depends only on this trait; the local and S3 implementations
/// must satisfy identical semantics.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store or overwrite the named file under the server's namespace,
    /// creating the namespace if it does not exist yet.
    ///
    /// Concurrent writes of the same name race at the backend;
    /// last-writer-wins is the only guarantee.
    async fn save_file(&self, server_id: &str, filename: &str, content: Bytes)
        -> StorageResult<()>;

    /// Enumerate all known servers. Unordered; an empty storage root yields
    /// an empty vec, never an error.
    async fn list_servers(&self) -> StorageResult<Vec<String>>;

    /// Enumerate the filenames belonging to one server. Fails with
    /// [`StorageError::ServerNotFound`] when the server's namespace does not
    /// exist.
    async fn list_server_files(&self, server_id: &str) -> StorageResult<Vec<String>>;
}

/// Validate a server ID or filename as a single path/key component.
///
/// Rejects anything that could escape the per-server namespace when joined
/// into a filesystem path or bucket/object name.
pub(crate) fn validate_component(value: &str) -> StorageResult<()> {
    if value.is_empty()
        || value == "."
        || value == ".."
        || value.contains('/')
        || value.contains('\\')
        || value.contains('\0')
    {
        return Err(StorageError::InvalidKey(format!(
            "'{}' is not a valid storage key component",
            value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_components() {
        assert!(validate_component("..").is_err());
        assert!(validate_component("a/b").is_err());
        assert!(validate_component("a\\b").is_err());
        assert!(validate_component("").is_err());
        assert!(validate_component(".").is_err());
    }

    #[test]
    fn accepts_plain_components() {
        assert!(validate_component("demo1.dem").is_ok());
        assert!(validate_component("0b0836cd-7089-3312-9f74-9e8f8ef08e82").is_ok());
        assert!(validate_component("round_2.PRdemo").is_ok());
    }
}
