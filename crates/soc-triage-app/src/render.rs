//! Plain-text rendering of triage views for terminal output.

use std::fmt::Write as _;

use soc_triage_analysis_contract::SeverityClass;
use soc_triage_ui::{HistoryEntry, ResultView, SAMPLE_ALERTS, TriageView};

/// Loading line shown while a request is in flight.
pub const LOADING_TEXT: &str = "Analyzing...";

/// Returns the badge printed next to a severity label.
pub fn severity_badge(label: &str, class: SeverityClass) -> String {
    let marker = match class {
        SeverityClass::High => "!!!",
        SeverityClass::Medium => "!!",
        SeverityClass::Low => "!",
    };
    format!("[{marker} {label} ({})]", class.as_str())
}

/// Renders the result area. Returns `None` when nothing should be printed.
pub fn render_view(view: &TriageView) -> Option<String> {
    match view {
        TriageView::Idle | TriageView::Revealing => None,
        TriageView::Loading => Some(LOADING_TEXT.to_string()),
        TriageView::Result(result) => Some(render_result(result)),
        TriageView::Error(message) => Some(format!("error: {message}")),
    }
}

/// Renders one revealed result.
pub fn render_result(result: &ResultView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Threat Analysis {}",
        severity_badge(&result.severity, result.severity_class)
    );
    let _ = writeln!(out, "Threat Type: {}", result.threat_type);
    let _ = writeln!(out, "MITRE ATT&CK: {}", result.mitre_technique);
    let _ = writeln!(out, "Impact: {}", result.impact);
    let _ = writeln!(out, "Mitigation Steps:");
    for step in &result.mitigation_steps {
        let _ = writeln!(out, "  - {step}");
    }
    out
}

/// Renders session history, newest first.
pub fn render_history<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> String {
    let mut out = String::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} -> {} / {} {}",
            index + 1,
            entry.input,
            entry.output.threat_type,
            entry.output.mitre_technique,
            severity_badge(&entry.output.severity, entry.output.severity_class())
        );
    }

    if out.is_empty() {
        out.push_str("No analyses yet.\n");
    }
    out
}

/// Renders the numbered sample list.
pub fn render_samples() -> String {
    let mut out = String::new();
    for (index, sample) in SAMPLE_ALERTS.iter().enumerate() {
        let _ = writeln!(out, "  Sample {}: {sample}", index + 1);
    }
    out
}
