#![warn(missing_docs)]
//! # soc-triage-analysis-contract
//!
//! ## Purpose
//! Defines the `/analyze` wire contract shared by the triage client and the
//! external analysis service.
//!
//! ## Responsibilities
//! - Build validated analysis requests from raw alert text.
//! - Parse analysis results returned by the service.
//! - Map open-ended severity labels to display-safe severity classes.
//!
//! ## Data flow
//! Alert text -> [`AnalysisRequest::new`] -> JSON body -> service ->
//! raw JSON -> [`parse_analysis_result`] -> [`severity_class`] -> UI projection.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs so results can outlive the response buffer
//! and be stored in session history.
//!
//! ## Error model
//! Blank alert text and invalid JSON return [`AnalysisContractError`].
//!
//! ## Security and privacy notes
//! Alert text may contain sensitive indicators; this crate never logs it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity labels the service is known to emit.
///
/// Membership is informational only; unknown labels are accepted and rendered
/// with the default treatment.
pub const KNOWN_SEVERITY_LABELS: [&str; 4] = ["Low", "Medium", "High", "Critical"];

/// Request body for `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Alert text exactly as submitted by the user.
    pub alert_text: String,
}

impl AnalysisRequest {
    /// Creates a validated request.
    ///
    /// The text is kept as typed; only the emptiness check trims it.
    ///
    /// # Errors
    /// Returns [`AnalysisContractError::EmptyAlert`] when the text is empty or
    /// whitespace only.
    pub fn new(alert_text: impl Into<String>) -> Result<Self, AnalysisContractError> {
        let alert_text = alert_text.into();
        if alert_text.trim().is_empty() {
            return Err(AnalysisContractError::EmptyAlert);
        }

        Ok(Self { alert_text })
    }

    /// Serializes the request to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`AnalysisContractError::Decode`] when serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, AnalysisContractError> {
        serde_json::to_vec(self).map_err(AnalysisContractError::Decode)
    }
}

/// Structured verdict returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Attack category, for example `Brute Force`.
    pub threat_type: String,
    /// MITRE ATT&CK technique identifier, treated as opaque text.
    pub mitre_technique: String,
    /// Severity label, for example `High`.
    pub severity: String,
    /// Short impact summary.
    pub impact: String,
    /// Ordered mitigation steps.
    pub mitigation_steps: Vec<String>,
}

impl AnalysisResult {
    /// Returns the display class for this result's severity label.
    pub fn severity_class(&self) -> SeverityClass {
        severity_class(&self.severity)
    }
}

/// Display treatment selected from a severity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityClass {
    /// High-severity badge.
    High,
    /// Medium-severity badge.
    Medium,
    /// Default badge, shared by `Low` and every unrecognized label.
    Low,
}

impl SeverityClass {
    /// Returns the stable class name used by renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            SeverityClass::High => "high",
            SeverityClass::Medium => "medium",
            SeverityClass::Low => "low",
        }
    }
}

/// Maps a severity label to its display class.
///
/// Matching is exact and case-sensitive. Only `High` and `Medium` have
/// dedicated treatments; `Critical` and unknown labels fall back to the
/// default class.
pub fn severity_class(label: &str) -> SeverityClass {
    match label {
        "High" => SeverityClass::High,
        "Medium" => SeverityClass::Medium,
        _ => SeverityClass::Low,
    }
}

/// Returns `true` when `label` is one of [`KNOWN_SEVERITY_LABELS`].
pub fn is_known_severity(label: &str) -> bool {
    KNOWN_SEVERITY_LABELS.contains(&label)
}

/// Parses a raw response body into an analysis result.
///
/// Unknown fields are ignored so the service may add fields without breaking
/// older clients.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for invalid JSON or a body that
/// does not have the result's shape.
pub fn parse_analysis_result(raw: &str) -> Result<AnalysisResult, AnalysisContractError> {
    serde_json::from_str(raw).map_err(AnalysisContractError::Decode)
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// Alert text is empty after trimming.
    #[error("alert text must be non-empty")]
    EmptyAlert,
    /// JSON encode/decode failure.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
}
