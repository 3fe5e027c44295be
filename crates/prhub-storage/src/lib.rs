//! PRHub Storage Library
//!
//! Storage abstraction and implementations for uploaded demo files. The
//! [`Storage`] trait is implemented by a local directory-tree backend and an
//! S3 bucket-per-server backend; both expose identical semantics so the HTTP
//! layer stays backend-agnostic.
//!
//! # Layout
//!
//! - **Local**: `{upload_dir}/{server_id}/{filename}`. Servers are the
//!   immediate subdirectories of the root.
//! - **S3**: bucket `prhub-server-{server_id}`, object key `{filename}`.
//!   Buckets are created lazily on first write.
//!
//! Server IDs and filenames are single path/key components; values containing
//! separators or `..` are rejected before touching the backend.

pub mod factory;
pub mod local;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use prhub_core::StorageBackend;
pub use s3::BucketStorage;
pub use traits::{Storage, StorageError, StorageResult};
