//! HTTP error response conversion
//!
//! Handlers return `Result<Response, HttpError>`. The wrapper exists
//! because of the orphan rule: `IntoResponse` (axum) cannot be implemented
//! directly for `IngestError` (intake-core) from this crate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use intake_core::IngestError;
use intake_storage::StoreError;

use crate::respond::error_json;
use crate::upload::IngestFailure;

/// Wrapper type for IngestError to implement IntoResponse.
#[derive(Debug)]
pub struct HttpError(pub IngestError);

impl From<IngestError> for HttpError {
    fn from(err: IngestError) -> Self {
        HttpError(err)
    }
}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        HttpError(IngestError::Io(err))
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        HttpError(IngestError::Io(err.into_io()))
    }
}

impl From<IngestFailure> for HttpError {
    fn from(failure: IngestFailure) -> Self {
        HttpError(failure.error)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let err = &self.0;
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %err, error_type = err.error_type(), "request failed");
        } else {
            tracing::debug!(error = %err, error_type = err.error_type(), "request rejected");
        }

        error_json(err, Some(status))
    }
}
