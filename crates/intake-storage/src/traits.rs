//! Filesystem abstraction trait
//!
//! The ingestion layer touches the filesystem only through this trait, so
//! upload handling stays testable against a temporary directory and the
//! host can substitute its own storage if it needs to.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs::File;

/// Filesystem operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create directory: {0}")]
    CreateDir(String),

    #[error("failed to create file: {0}")]
    CreateFile(String),

    #[error("failed to open file: {0}")]
    OpenFile(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Flatten into an `std::io::Error` for callers that report all
    /// filesystem failures through a single IO classification.
    pub fn into_io(self) -> std::io::Error {
        match self {
            StoreError::Io(err) => err,
            other => std::io::Error::other(other.to_string()),
        }
    }
}

/// Result type for filesystem operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Filesystem collaborator used by the upload and download paths.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Create `path` and all missing parents. Idempotent: succeeding twice
    /// in a row leaves exactly one directory behind.
    async fn ensure_dir(&self, path: &Path) -> StoreResult<()>;

    /// Whether a file or directory exists at `path`.
    async fn exists(&self, path: &Path) -> StoreResult<bool>;

    /// Create (truncating) a file at `path` for writing.
    async fn create(&self, path: &Path) -> StoreResult<File>;

    /// Open the file at `path` for reading.
    async fn open(&self, path: &Path) -> StoreResult<File>;
}
