//! Attachment downloads
//!
//! Serves a stored file as a forced download by setting
//! `Content-Disposition: attachment` with a caller-chosen display name.
//! Bytes are streamed straight from the file, never fully buffered.

use std::path::Path;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use intake_core::IngestError;
use intake_storage::FileStore;
use tokio_util::io::ReaderStream;

use crate::error::HttpError;

/// Build a streaming attachment response for `stored_name` inside
/// `base_dir`, reading through `store`. The browser is told to save the
/// file as `display_name`.
pub async fn attachment(
    store: &dyn FileStore,
    base_dir: &Path,
    stored_name: &str,
    display_name: &str,
) -> Result<Response, HttpError> {
    // Stored names never contain path separators; anything else cannot
    // name a file in the dedicated storage directory.
    if stored_name.contains('/') || stored_name.contains('\\') || stored_name.contains("..") {
        return Err(HttpError(IngestError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no such stored file: {stored_name}"),
        ))));
    }

    let path = base_dir.join(stored_name);
    let file = store.open(&path).await?;
    let length = file.metadata().await.map_err(IngestError::Io)?.len();

    let body = Body::from_stream(ReaderStream::new(file));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, length)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{display_name}\""),
        )
        .body(body)
        .map_err(|e| IngestError::Io(std::io::Error::other(e)))?;

    Ok(response)
}
