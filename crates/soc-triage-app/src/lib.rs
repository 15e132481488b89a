#![warn(missing_docs)]
//! # soc-triage-app
//!
//! ## Purpose
//! Orchestrates configuration, the analysis client, and the triage state
//! machine for the `soc-triage` terminal client.
//!
//! ## Responsibilities
//! - Resolve startup configuration once (CLI, environment, TOML, defaults).
//! - Build the analysis client around an injected base URL.
//! - Drive the submit/complete/reveal lifecycle through [`TriageSession`].
//! - Render views as terminal text and keep alert text out of logs.
//!
//! ## Data flow
//! Config -> [`build_client`] -> [`TriageSession::submit`] -> worker runs
//! [`AnalysisJob`] -> [`TriageSession::apply`] -> [`TriageSession::tick`] ->
//! [`render::render_view`].
//!
//! ## Ownership and lifetimes
//! Jobs own a clone of the client and the submitted text, so they can move to
//! worker threads while the session stays on the event-loop thread.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`]. Request failures are not
//! app errors; they become the session's error state.
//!
//! ## Security and privacy notes
//! Log lines carry [`alert_preview`] output only, never raw alert text.

pub mod clock;
pub mod command;
pub mod config;
pub mod render;
pub mod session;

use std::sync::Arc;

use soc_triage_client::{AnalysisClient, ClientError, HttpTransport, is_secure_or_loopback};
use thiserror::Error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, TriageConfig};
pub use session::{AnalysisCompletion, AnalysisJob, Submission, TriageSession};

/// Build-time application version loaded from root `VERSION`.
pub const APP_VERSION: &str = env!("SOC_TRIAGE_VERSION");

const ALERT_PREVIEW_CHARS: usize = 48;

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Builds an HTTP-backed analysis client from resolved configuration.
///
/// # Errors
/// Returns [`AppError::Client`] when the base URL is unusable or the HTTP
/// stack cannot initialize.
pub fn build_client(config: &TriageConfig) -> Result<AnalysisClient, AppError> {
    let transport = HttpTransport::new(config.request_timeout())?;
    let client = AnalysisClient::new(&config.api_url, Arc::new(transport))?;

    if !is_secure_or_loopback(client.endpoint()) {
        tracing::warn!(
            endpoint = %client.endpoint(),
            "analysis endpoint uses plain http to a remote host"
        );
    }

    Ok(client)
}

/// Redacts common secret markers in log-safe output.
///
/// Everything from the first marker onward is replaced, since the value's
/// extent cannot be known for free text.
pub fn redact_sensitive(input: &str) -> String {
    let lower = input.to_ascii_lowercase();
    let first_marker = ["password", "token", "authorization", "bearer", "secret"]
        .iter()
        .filter_map(|key| lower.find(key).map(|position| (position, *key)))
        .min_by_key(|(position, _)| *position);

    match first_marker {
        Some((position, key)) => format!("{}{key}=<redacted>", &input[..position]),
        None => input.to_string(),
    }
}

/// Produces a short single-line, redacted preview of alert text for logs.
pub fn alert_preview(alert_text: &str) -> String {
    let collapsed = alert_text.split_whitespace().collect::<Vec<_>>().join(" ");
    let redacted = redact_sensitive(&collapsed);
    match redacted.char_indices().nth(ALERT_PREVIEW_CHARS) {
        Some((index, _)) => format!("{}...", &redacted[..index]),
        None => redacted,
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be resolved.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Analysis client could not be built.
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}
