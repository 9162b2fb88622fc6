//! JSON response writing
//!
//! Every JSON-producing endpoint in this layer responds with the same
//! envelope shape: `{ error, message, data? }`. An error envelope never
//! carries `data`.

use axum::body::Body;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use intake_core::IngestError;
use serde::{Deserialize, Serialize};

/// Uniform success/error response shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ResponseEnvelope {
    pub fn ok(message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Serialize `value` into a JSON response with the given status.
///
/// `extra_headers` are applied after the defaults, so caller-supplied
/// headers win, including over `Content-Type`. Serialization failure is
/// returned to the caller, never swallowed.
pub fn write_json<T: Serialize>(
    status: StatusCode,
    value: &T,
    extra_headers: Option<HeaderMap>,
) -> Result<Response, IngestError> {
    let body = serde_json::to_vec(value).map_err(std::io::Error::other)?;

    let mut response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .map_err(std::io::Error::other)?;

    if let Some(headers) = extra_headers {
        for (name, value) in headers.iter() {
            response.headers_mut().insert(name, value.clone());
        }
    }

    Ok(response)
}

/// Render an error as an envelope response. Defaults to 400 Bad Request
/// when no status is given.
pub fn error_json(err: &IngestError, status: Option<StatusCode>) -> Response {
    let status = status.unwrap_or(StatusCode::BAD_REQUEST);
    let envelope = ResponseEnvelope::failure(err.to_string());
    match write_json(status, &envelope, None) {
        Ok(response) => response,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
