//! Router wiring
//!
//! Builds the axum router the demo binary serves and the integration
//! tests exercise. All results and errors flow back through the JSON
//! envelope.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Router};
use intake_core::IngestConfig;
use intake_storage::{FileStore, LocalStore};
use serde::Deserialize;

use crate::download::attachment;
use crate::error::HttpError;
use crate::json::StrictJson;
use crate::respond::{write_json, ResponseEnvelope};
use crate::upload::UploadIngestor;

#[derive(Clone)]
struct AppState {
    ingestor: Arc<UploadIngestor>,
    store: Arc<dyn FileStore>,
    upload_dir: PathBuf,
}

/// Build the ingestion router for `config`, storing uploads under
/// `upload_dir`. Upload and download paths share one store.
pub fn router(config: IngestConfig, upload_dir: PathBuf) -> Router {
    let store: Arc<dyn FileStore> = Arc::new(LocalStore::new());
    let state = AppState {
        ingestor: Arc::new(UploadIngestor::with_store(config.clone(), store.clone())),
        store,
        upload_dir,
    };

    Router::new()
        .route("/upload", post(upload_files))
        .route("/upload-one", post(upload_one_file))
        .route("/notify", post(receive_notification))
        .route("/download/{name}", get(download_file))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(Extension(config))
        .with_state(state)
}

async fn upload_files(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, HttpError> {
    let records = state
        .ingestor
        .ingest(multipart, &state.upload_dir, true)
        .await?;

    let data = serde_json::to_value(&records).map_err(std::io::Error::other)?;
    let envelope = ResponseEnvelope::ok(
        format!("{} file(s) uploaded", records.len()),
        Some(data),
    );
    Ok(write_json(StatusCode::CREATED, &envelope, None)?)
}

async fn upload_one_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, HttpError> {
    let record = state
        .ingestor
        .ingest_one(multipart, &state.upload_dir, true)
        .await?;

    let data = serde_json::to_value(&record).map_err(std::io::Error::other)?;
    let envelope = ResponseEnvelope::ok("file uploaded", Some(data));
    Ok(write_json(StatusCode::CREATED, &envelope, None)?)
}

/// Shape accepted by the notification endpoint.
#[derive(Debug, Deserialize)]
struct Notification {
    event: String,
    #[serde(default)]
    detail: Option<String>,
}

async fn receive_notification(
    StrictJson(notification): StrictJson<Notification>,
) -> Result<Response, HttpError> {
    tracing::info!(
        event = %notification.event,
        detail = ?notification.detail,
        "notification received"
    );
    let envelope = ResponseEnvelope::ok("notification accepted", None);
    Ok(write_json(StatusCode::ACCEPTED, &envelope, None)?)
}

async fn download_file(
    State(state): State<AppState>,
    UrlPath(name): UrlPath<String>,
) -> Result<Response, HttpError> {
    attachment(state.store.as_ref(), &state.upload_dir, &name, &name).await
}
