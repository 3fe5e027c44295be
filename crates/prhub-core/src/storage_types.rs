//! Storage backend selection.

/// Which storage backend the hub persists demo files to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Local filesystem directory tree.
    Local,
    /// S3-compatible object storage, one bucket per server.
    S3,
}
