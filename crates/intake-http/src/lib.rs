//! Intake HTTP Library
//!
//! The axum-facing surface of the ingestion layer: multipart upload
//! ingestion, strict JSON body decoding, the uniform JSON response
//! envelope, and attachment downloads, plus a ready-made [`Router`] the
//! demo binary and integration tests share.
//!
//! [`Router`]: axum::Router

pub mod app;
pub mod download;
pub mod error;
pub mod json;
pub mod respond;
pub mod upload;

// Re-export commonly used types
pub use app::router;
pub use error::HttpError;
pub use json::{decode_json, StrictJson};
pub use respond::{error_json, write_json, ResponseEnvelope};
pub use upload::{IngestFailure, UploadIngestor, UploadedFile};
