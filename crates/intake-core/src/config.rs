//! Ingestion configuration
//!
//! Size ceilings and type restrictions applied by the upload and JSON
//! decoding paths. Defaults are named constants; nothing here is global
//! mutable state.

use std::env;

/// Default ceiling for a whole multipart upload body: 1 GiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

/// Default ceiling for a structured JSON body: 1 MiB.
pub const DEFAULT_MAX_JSON_BYTES: usize = 1024 * 1024;

/// Configuration for one ingestion instance.
///
/// An empty `allowed_types` list is permissive: callers that want strict
/// allow-listing must supply a non-empty set.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub max_upload_bytes: usize,
    pub allowed_types: Vec<String>,
    pub max_json_bytes: usize,
    pub allow_unknown_fields: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_types: Vec::new(),
            max_json_bytes: DEFAULT_MAX_JSON_BYTES,
            allow_unknown_fields: false,
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_json_bytes(mut self, max: usize) -> Self {
        self.max_json_bytes = max;
        self
    }

    pub fn with_allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset or unparseable:
    /// `INTAKE_MAX_UPLOAD_BYTES`, `INTAKE_ALLOWED_TYPES` (comma-separated),
    /// `INTAKE_MAX_JSON_BYTES`, `INTAKE_ALLOW_UNKNOWN_FIELDS`.
    pub fn from_env() -> Self {
        let max_upload_bytes = env::var("INTAKE_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let allowed_types = env::var("INTAKE_ALLOWED_TYPES")
            .map(|v| {
                v.split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let max_json_bytes = env::var("INTAKE_MAX_JSON_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_JSON_BYTES);

        let allow_unknown_fields = env::var("INTAKE_ALLOW_UNKNOWN_FIELDS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            max_upload_bytes,
            allowed_types,
            max_json_bytes,
            allow_unknown_fields,
        }
    }

    /// Whether a sniffed content type passes the allow-list. An empty list
    /// accepts everything; a non-empty list requires a case-insensitive
    /// match.
    pub fn is_type_allowed(&self, content_type: &str) -> bool {
        self.allowed_types.is_empty()
            || self
                .allowed_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }
}
