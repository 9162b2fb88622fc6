//! Local filesystem implementation of [`FileStore`].

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::{self, File};

use crate::traits::{FileStore, StoreError, StoreResult};

/// Local filesystem store backed by `tokio::fs`.
#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        LocalStore
    }
}

#[async_trait]
impl FileStore for LocalStore {
    async fn ensure_dir(&self, path: &Path) -> StoreResult<()> {
        fs::create_dir_all(path).await.map_err(|e| {
            StoreError::CreateDir(format!("{}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "ensured directory");
        Ok(())
    }

    async fn exists(&self, path: &Path) -> StoreResult<bool> {
        Ok(fs::try_exists(path).await.unwrap_or(false))
    }

    async fn create(&self, path: &Path) -> StoreResult<File> {
        File::create(path).await.map_err(|e| {
            StoreError::CreateFile(format!("{}: {}", path.display(), e))
        })
    }

    async fn open(&self, path: &Path) -> StoreResult<File> {
        File::open(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::Io(e),
            _ => StoreError::OpenFile(format!("{}: {}", path.display(), e)),
        })
    }
}
