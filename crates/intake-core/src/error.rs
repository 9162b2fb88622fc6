//! Error types module
//!
//! Every failure the ingestion layer can produce is a variant of
//! [`IngestError`]. A decode or upload attempt yields either a fully
//! populated value or exactly one of these errors; nothing is aggregated
//! and nothing is retried. Display strings are the client-facing messages.

use std::io;

use thiserror::Error;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("body must not be larger than {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("malformed multipart request: {0}")]
    MalformedUpload(String),

    #[error("the uploaded file type {0} is not permitted")]
    UnsupportedFileType(String),

    #[error("no file was provided")]
    NoFileProvided,

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("body contains badly-formed JSON (at character {offset})")]
    Syntax { offset: usize },

    #[error("body contains badly-formed JSON")]
    Truncated,

    #[error("{}", type_mismatch_message(.field, *.offset))]
    TypeMismatch {
        field: Option<String>,
        offset: usize,
    },

    #[error("body must not be empty")]
    EmptyBody,

    #[error("body contains unknown key {0:?}")]
    UnknownField(String),

    #[error("body must have only a single JSON value")]
    MultipleJsonValues,

    #[error("error decoding JSON: {0}")]
    Decode(String),
}

fn type_mismatch_message(field: &Option<String>, offset: usize) -> String {
    match field {
        Some(name) => format!("body contains incorrect JSON type for field {:?}", name),
        None => format!("body contains incorrect JSON type (at character {})", offset),
    }
}

impl IngestError {
    /// HTTP status code this error should be rendered with.
    pub fn status_code(&self) -> u16 {
        match self {
            IngestError::PayloadTooLarge { .. } => 413,
            IngestError::UnsupportedFileType(_) => 415,
            IngestError::Io(err) if err.kind() == io::ErrorKind::NotFound => 404,
            IngestError::Io(_) => 500,
            IngestError::MalformedUpload(_)
            | IngestError::NoFileProvided
            | IngestError::Syntax { .. }
            | IngestError::Truncated
            | IngestError::TypeMismatch { .. }
            | IngestError::EmptyBody
            | IngestError::UnknownField(_)
            | IngestError::MultipleJsonValues
            | IngestError::Decode(_) => 400,
        }
    }

    /// Variant name, used in structured log events.
    pub fn error_type(&self) -> &'static str {
        match self {
            IngestError::PayloadTooLarge { .. } => "PayloadTooLarge",
            IngestError::MalformedUpload(_) => "MalformedUpload",
            IngestError::UnsupportedFileType(_) => "UnsupportedFileType",
            IngestError::NoFileProvided => "NoFileProvided",
            IngestError::Io(_) => "Io",
            IngestError::Syntax { .. } => "Syntax",
            IngestError::Truncated => "Truncated",
            IngestError::TypeMismatch { .. } => "TypeMismatch",
            IngestError::EmptyBody => "EmptyBody",
            IngestError::UnknownField(_) => "UnknownField",
            IngestError::MultipleJsonValues => "MultipleJsonValues",
            IngestError::Decode(_) => "Decode",
        }
    }
}
