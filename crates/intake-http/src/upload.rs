//! Multipart upload ingestion
//!
//! Streams file parts from a multipart body to a destination directory
//! without ever buffering a whole file in memory. Each part is sniffed by
//! content (the declared Content-Type header is never trusted), checked
//! against the configured allow-list, optionally renamed to a random
//! identifier, and written chunk by chunk while the cumulative request
//! size is charged against the configured ceiling.

use std::path::Path;
use std::sync::Arc;

use axum::extract::multipart::{Field, Multipart};
use bytes::Bytes;
use intake_core::ident::{random_name, STORED_NAME_LEN};
use intake_core::sniff::{detect_content_type, SNIFF_LEN};
use intake_core::{IngestConfig, IngestError};
use intake_storage::{FileStore, LocalStore};
use serde::Serialize;
use tokio::io::AsyncWriteExt;

/// Record of one accepted file part. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub original_name: String,
    pub stored_name: String,
    pub byte_size: u64,
}

/// An ingestion failure, carrying the records that were fully stored
/// before the failing part. Callers decide whether to keep or clean up
/// the corresponding files; nothing is rolled back here.
#[derive(Debug)]
pub struct IngestFailure {
    pub error: IngestError,
    pub completed: Vec<UploadedFile>,
}

/// Cumulative byte ceiling across all file parts of one request.
struct SizeBudget {
    used: u64,
    limit: u64,
}

impl SizeBudget {
    fn new(limit: usize) -> Self {
        Self {
            used: 0,
            limit: limit as u64,
        }
    }

    fn charge(&mut self, bytes: usize) -> Result<(), IngestError> {
        self.used += bytes as u64;
        if self.used > self.limit {
            return Err(IngestError::PayloadTooLarge {
                limit: self.limit as usize,
            });
        }
        Ok(())
    }
}

/// Orchestrates multipart file ingestion. Holds no cross-request state;
/// one instance can serve any number of concurrent calls.
pub struct UploadIngestor {
    config: IngestConfig,
    store: Arc<dyn FileStore>,
}

impl UploadIngestor {
    pub fn new(config: IngestConfig) -> Self {
        Self::with_store(config, Arc::new(LocalStore::new()))
    }

    pub fn with_store(config: IngestConfig, store: Arc<dyn FileStore>) -> Self {
        Self { config, store }
    }

    /// Ingest every file part of `multipart` into `dest`, in reader order.
    ///
    /// Fields without a file name are skipped. The first per-part failure
    /// ends the call; records accumulated before it travel in the
    /// [`IngestFailure`].
    pub async fn ingest(
        &self,
        mut multipart: Multipart,
        dest: &Path,
        rename: bool,
    ) -> Result<Vec<UploadedFile>, IngestFailure> {
        let mut completed = Vec::new();

        if let Err(err) = self.store.ensure_dir(dest).await {
            return Err(IngestFailure {
                error: IngestError::Io(err.into_io()),
                completed,
            });
        }

        let mut budget = SizeBudget::new(self.config.max_upload_bytes);

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(err) => {
                    return Err(IngestFailure {
                        error: IngestError::MalformedUpload(err.to_string()),
                        completed,
                    })
                }
            };

            let Some(original_name) = field.file_name().map(str::to_owned) else {
                continue;
            };

            match self
                .ingest_part(field, &original_name, dest, rename, &mut budget)
                .await
            {
                Ok(record) => completed.push(record),
                Err(error) => return Err(IngestFailure { error, completed }),
            }
        }

        Ok(completed)
    }

    /// Convenience wrapper that ingests the request and returns the first
    /// stored file, failing with `NoFileProvided` when the form held none.
    pub async fn ingest_one(
        &self,
        multipart: Multipart,
        dest: &Path,
        rename: bool,
    ) -> Result<UploadedFile, IngestFailure> {
        let records = self.ingest(multipart, dest, rename).await?;
        records.into_iter().next().ok_or(IngestFailure {
            error: IngestError::NoFileProvided,
            completed: Vec::new(),
        })
    }

    async fn ingest_part(
        &self,
        mut field: Field<'_>,
        original_name: &str,
        dest: &Path,
        rename: bool,
        budget: &mut SizeBudget,
    ) -> Result<UploadedFile, IngestError> {
        // Buffer just enough of the part to sniff it. `carry` holds the
        // remainder of the chunk that crossed the sniff boundary.
        let mut prefix = Vec::with_capacity(SNIFF_LEN);
        let mut carry: Option<Bytes> = None;
        while prefix.len() < SNIFF_LEN {
            match next_chunk(&mut field).await? {
                Some(chunk) => {
                    let want = SNIFF_LEN - prefix.len();
                    if chunk.len() <= want {
                        prefix.extend_from_slice(&chunk);
                    } else {
                        prefix.extend_from_slice(&chunk[..want]);
                        carry = Some(chunk.slice(want..));
                        break;
                    }
                }
                None => break,
            }
        }

        let content_type = detect_content_type(&prefix);
        if !self.config.is_type_allowed(content_type) {
            return Err(IngestError::UnsupportedFileType(content_type.to_string()));
        }

        let stored_name = if rename {
            format!(
                "{}{}",
                random_name(STORED_NAME_LEN),
                extension_of(original_name)
            )
        } else {
            original_name.to_string()
        };

        let path = dest.join(&stored_name);
        let mut file = self
            .store
            .create(&path)
            .await
            .map_err(|e| IngestError::Io(e.into_io()))?;

        let mut byte_size: u64 = 0;

        budget.charge(prefix.len())?;
        file.write_all(&prefix).await?;
        byte_size += prefix.len() as u64;

        if let Some(chunk) = carry {
            budget.charge(chunk.len())?;
            file.write_all(&chunk).await?;
            byte_size += chunk.len() as u64;
        }

        while let Some(chunk) = next_chunk(&mut field).await? {
            budget.charge(chunk.len())?;
            file.write_all(&chunk).await?;
            byte_size += chunk.len() as u64;
        }

        file.flush().await?;

        tracing::info!(
            original = %original_name,
            stored = %stored_name,
            content_type = %content_type,
            bytes = byte_size,
            "stored uploaded file"
        );

        Ok(UploadedFile {
            original_name: original_name.to_string(),
            stored_name,
            byte_size,
        })
    }
}

async fn next_chunk(field: &mut Field<'_>) -> Result<Option<Bytes>, IngestError> {
    field
        .chunk()
        .await
        .map_err(|err| IngestError::MalformedUpload(err.to_string()))
}

/// Extension of `name` including the dot, or empty when it has none.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
