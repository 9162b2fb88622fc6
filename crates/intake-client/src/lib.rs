//! Outbound JSON push client.
//!
//! Serializes a value and POSTs it as `application/json` to a remote
//! endpoint, handing back the downstream status and body untouched. Used
//! for service-to-service notifications; not part of the ingestion core.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum PushError {
    #[error("failed to build http client: {0}")]
    Build(reqwest::Error),

    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),
}

/// What the remote endpoint answered. The status is reported as-is;
/// deciding whether a non-2xx counts as failure is the caller's call.
#[derive(Debug, Clone)]
pub struct PushReceipt {
    pub status: u16,
    pub body: String,
}

/// JSON push client over an injectable [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct PushClient {
    client: Client,
}

impl PushClient {
    pub fn new() -> Result<Self, PushError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(PushError::Build)?;
        Ok(Self { client })
    }

    /// Use a caller-configured transport.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// POST `value` as JSON to `url` and return the downstream answer.
    pub async fn push_json<T: Serialize>(
        &self,
        url: &str,
        value: &T,
    ) -> Result<PushReceipt, PushError> {
        let response = self.client.post(url).json(value).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(url = %url, status, "pushed JSON payload");

        Ok(PushReceipt { status, body })
    }
}
