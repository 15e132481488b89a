//! Blocking HTTP transport backed by `reqwest`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{AnalysisTransport, ClientError, JSON_CONTENT_TYPE, TransportResponse};

/// Real transport that posts JSON over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds a transport with an optional transport-level timeout.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when the HTTP client cannot be
    /// initialized (for example, TLS backend setup failure).
    pub fn new(timeout: Option<Duration>) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("soc-triage/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|error| ClientError::Transport(format!("http client init failed: {error}")))?;

        Ok(Self { client })
    }

    /// Wraps a preconfigured `reqwest` client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl AnalysisTransport for HttpTransport {
    fn post_json(&self, endpoint: &Url, body: &[u8]) -> Result<TransportResponse, ClientError> {
        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body.to_vec())
            .send()
            .map_err(|error| ClientError::Transport(error.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| ClientError::Transport(format!("failed to read body: {error}")))?;

        Ok(TransportResponse { status, body })
    }
}
