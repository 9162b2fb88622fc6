//! Strict JSON body decoding
//!
//! Decodes exactly one JSON value into a target shape and classifies every
//! failure. Stricter than plain `serde_json::from_slice` on four points:
//! the body is size-bounded, unknown fields are rejected (configurable),
//! an empty body is its own error, and trailing content after the first
//! value is rejected.

use axum::extract::{FromRequest, Request};
use intake_core::{IngestConfig, IngestError};
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Decode `body` as exactly one JSON value of shape `T`.
///
/// Classification order on failure: malformed token stream, truncated
/// stream, shape mismatch, empty body, unknown key, size ceiling, then
/// unclassified.
pub fn decode_json<T: DeserializeOwned>(
    body: &[u8],
    max_bytes: usize,
    allow_unknown_fields: bool,
) -> Result<T, IngestError> {
    if body.len() > max_bytes {
        return Err(IngestError::PayloadTooLarge { limit: max_bytes });
    }
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(IngestError::EmptyBody);
    }

    let mut de = serde_json::Deserializer::from_slice(body);
    let mut track = serde_path_to_error::Track::new();
    let path_de = serde_path_to_error::Deserializer::new(&mut de, &mut track);

    // Unknown keys are ignored by the serde derive; capture the first one
    // so it can be rejected when the caller disallows them.
    let mut unknown: Option<String> = None;
    let decoded: Result<T, serde_json::Error> = serde_ignored::deserialize(path_de, |path| {
        if unknown.is_none() {
            unknown = Some(path.to_string());
        }
    });

    let value = match decoded {
        Ok(value) => value,
        Err(err) => return Err(classify(err, track, body)),
    };

    if !allow_unknown_fields {
        if let Some(name) = unknown {
            return Err(IngestError::UnknownField(name));
        }
    }

    // Anything after the first value other than whitespace means the body
    // held multiple concatenated JSON documents.
    de.end().map_err(|_| IngestError::MultipleJsonValues)?;

    Ok(value)
}

fn classify(
    err: serde_json::Error,
    track: serde_path_to_error::Track,
    body: &[u8],
) -> IngestError {
    use serde_json::error::Category;

    match err.classify() {
        Category::Syntax => IngestError::Syntax {
            offset: byte_offset(body, err.line(), err.column()),
        },
        Category::Eof => IngestError::Truncated,
        Category::Data => IngestError::TypeMismatch {
            field: leaf_field(track),
            offset: byte_offset(body, err.line(), err.column()),
        },
        Category::Io => IngestError::Decode(err.to_string()),
    }
}

/// Innermost map key on the error path, when the failure is attributable
/// to a specific field. Consumes the track: `Track::path` takes ownership.
fn leaf_field(track: serde_path_to_error::Track) -> Option<String> {
    let path = track.path();
    let mut field = None;
    for segment in path.iter() {
        if let serde_path_to_error::Segment::Map { key } = segment {
            field = Some(key.clone());
        }
    }
    field
}

/// Whether a body-collection failure was the length ceiling, as opposed
/// to a transport error. Walks the source chain for the limiter's error
/// type rather than matching on display text.
fn hit_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(inner) = source {
        if inner
            .downcast_ref::<http_body_util::LengthLimitError>()
            .is_some()
        {
            return true;
        }
        source = inner.source();
    }
    false
}

/// Translate serde_json's 1-based line/column into a 1-based byte offset
/// within the body.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let start: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    start + column
}

/// Strict JSON body extractor.
///
/// Reads the body up to the configured `max_json_bytes` (independent of
/// Content-Length) and runs [`decode_json`]. Configuration comes from an
/// `IngestConfig` request extension when present, defaults otherwise.
/// Rejections render as the standard error envelope.
#[derive(Debug, Clone, Copy)]
pub struct StrictJson<T>(pub T);

impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let config = req
            .extensions()
            .get::<IngestConfig>()
            .cloned()
            .unwrap_or_default();

        let body = axum::body::to_bytes(req.into_body(), config.max_json_bytes)
            .await
            .map_err(|err| {
                if hit_length_limit(&err) {
                    HttpError(IngestError::PayloadTooLarge {
                        limit: config.max_json_bytes,
                    })
                } else {
                    HttpError(IngestError::Decode(err.to_string()))
                }
            })?;

        let value = decode_json(&body, config.max_json_bytes, config.allow_unknown_fields)?;
        Ok(StrictJson(value))
    }
}
