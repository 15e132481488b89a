#![warn(missing_docs)]
//! # soc-triage-client
//!
//! ## Purpose
//! Sends alert text to the external analysis service and returns its verdict.
//!
//! ## Responsibilities
//! - Resolve the `/analyze` endpoint from a configured base URL.
//! - Execute requests through an injectable transport abstraction.
//! - Fold transport, HTTP status, and body parse failures into [`ClientError`]
//!   and classify them with [`classify_failure`].
//!
//! ## Data flow
//! Alert text -> [`AnalysisClient::analyze`] builds the request body ->
//! [`AnalysisTransport::post_json`] -> status check -> result parsing.
//!
//! ## Ownership and lifetimes
//! The client holds the transport behind an `Arc` so it can be cloned into
//! worker threads without borrowing UI state.
//!
//! ## Error model
//! There is no retry and no request cancellation. Every failure is returned
//! once; callers decide how to surface it.
//!
//! ## Security and privacy notes
//! The client never logs alert text or response bodies.
//!
//! ## Example
//! ```rust
//! use soc_triage_client::resolve_analyze_endpoint;
//!
//! let endpoint = resolve_analyze_endpoint("http://127.0.0.1:8000/").unwrap();
//! assert_eq!(endpoint.as_str(), "http://127.0.0.1:8000/analyze");
//! ```

mod http;

use std::net::IpAddr;
use std::sync::Arc;

use soc_triage_analysis_contract::{
    AnalysisContractError, AnalysisRequest, AnalysisResult, parse_analysis_result,
};
use thiserror::Error;
use url::{Host, Url};

pub use http::HttpTransport;

/// Path appended to the configured base URL.
pub const ANALYZE_PATH: &str = "/analyze";

/// Content type sent with every analysis request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

const ERROR_BODY_PREVIEW_CHARS: usize = 256;

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by the analysis client.
pub trait AnalysisTransport: Send + Sync {
    /// Posts a JSON body to `endpoint` and returns the raw response.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when no HTTP response was received.
    fn post_json(&self, endpoint: &Url, body: &[u8]) -> Result<TransportResponse, ClientError>;
}

/// Client bound to one resolved analysis endpoint.
#[derive(Clone)]
pub struct AnalysisClient {
    endpoint: Url,
    transport: Arc<dyn AnalysisTransport>,
}

impl AnalysisClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidEndpoint`] when the base URL cannot be
    /// resolved (see [`resolve_analyze_endpoint`]).
    pub fn new(base_url: &str, transport: Arc<dyn AnalysisTransport>) -> Result<Self, ClientError> {
        let endpoint = resolve_analyze_endpoint(base_url)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Submits one alert and returns the parsed verdict.
    ///
    /// # Errors
    /// - [`ClientError::EmptyAlert`] for blank text; no request is sent.
    /// - [`ClientError::Transport`] when the service is unreachable.
    /// - [`ClientError::Http`] for non-2xx statuses.
    /// - [`ClientError::Codec`] when the body is not a valid result.
    pub fn analyze(&self, alert_text: &str) -> Result<AnalysisResult, ClientError> {
        let request = AnalysisRequest::new(alert_text).map_err(|error| match error {
            AnalysisContractError::EmptyAlert => ClientError::EmptyAlert,
            other => ClientError::Codec(other),
        })?;
        let body = request.to_json_bytes()?;

        let response = self.transport.post_json(&self.endpoint, &body)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            status = response.status,
            body_len = response.body.len(),
            "analysis response received"
        );

        if !response.is_success() {
            return Err(ClientError::Http {
                status: response.status,
                body: truncate_chars(&response.body, ERROR_BODY_PREVIEW_CHARS),
            });
        }

        Ok(parse_analysis_result(&response.body)?)
    }

    /// Returns the resolved `/analyze` endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Resolves `<base_url>/analyze`.
///
/// Trailing slashes on the base are trimmed and any existing path prefix is
/// kept, so `https://host/api/` resolves to `https://host/api/analyze`.
///
/// # Errors
/// Returns [`ClientError::InvalidEndpoint`] for blank or unparsable URLs,
/// non-HTTP schemes, and base URLs carrying a query or fragment.
pub fn resolve_analyze_endpoint(base_url: &str) -> Result<Url, ClientError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidEndpoint("base url is empty".to_string()));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|error| ClientError::InvalidEndpoint(format!("invalid base url: {error}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ClientError::InvalidEndpoint(format!(
            "unsupported scheme '{}', expected http or https",
            parsed.scheme()
        )));
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ClientError::InvalidEndpoint(
            "base url must not carry a query or fragment".to_string(),
        ));
    }

    let mut endpoint = parsed.clone();
    let prefix = parsed.path().trim_end_matches('/');
    endpoint.set_path(&format!("{prefix}{ANALYZE_PATH}"));
    Ok(endpoint)
}

/// Returns `true` when traffic to `endpoint` is encrypted or stays on the
/// local machine.
pub fn is_secure_or_loopback(endpoint: &Url) -> bool {
    if endpoint.scheme() == "https" {
        return true;
    }

    match endpoint.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(address)) => IpAddr::V4(address).is_loopback(),
        Some(Host::Ipv6(address)) => IpAddr::V6(address).is_loopback(),
        None => false,
    }
}

/// Coarse failure taxonomy used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Empty input; not an error, the request was never sent.
    ValidationSkip,
    /// Service unreachable or endpoint unusable.
    Transport,
    /// Service answered with a non-2xx status.
    Http,
    /// Body could not be encoded or decoded.
    Parse,
}

impl FailureKind {
    /// Returns a stable label for structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::ValidationSkip => "validation_skip",
            FailureKind::Transport => "transport",
            FailureKind::Http => "http",
            FailureKind::Parse => "parse",
        }
    }
}

/// Classifies a client error into the failure taxonomy.
pub fn classify_failure(error: &ClientError) -> FailureKind {
    match error {
        ClientError::EmptyAlert => FailureKind::ValidationSkip,
        ClientError::InvalidEndpoint(_) | ClientError::Transport(_) => FailureKind::Transport,
        ClientError::Http { .. } => FailureKind::Http,
        ClientError::Codec(_) => FailureKind::Parse,
    }
}

fn truncate_chars(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &input[..index]),
        None => input.to_string(),
    }
}

/// Errors produced by the analysis client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL violates endpoint requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Alert text was empty after trimming.
    #[error("alert text must be non-empty")]
    EmptyAlert,
    /// No HTTP response was received.
    #[error("analysis transport failure: {0}")]
    Transport(String),
    /// Service returned a non-2xx status.
    #[error("analysis service returned HTTP {status}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Truncated response body for diagnostics.
        body: String,
    },
    /// Request or response body failed the contract codec.
    #[error("analysis codec failure: {0}")]
    Codec(#[from] AnalysisContractError),
}
