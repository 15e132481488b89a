#![warn(missing_docs)]
//! # soc-triage-ui
//!
//! ## Purpose
//! Defines the UI-facing state machine for one triage session.
//!
//! ## Responsibilities
//! - Track input text, loading flag, current result, reveal flag, and error.
//! - Correlate completions with the latest submission and drop stale ones.
//! - Keep the newest-first session history.
//! - Project state into a render-ready [`TriageView`].
//!
//! ## Data flow
//! Input edits -> [`TriageState::submit`] hands a [`PendingRequest`] to the
//! orchestrator -> the orchestrator reports back through
//! [`TriageState::on_success`] or [`TriageState::on_failure`] ->
//! [`TriageState::on_tick`] performs the deferred reveal ->
//! [`TriageState::view`] drives rendering.
//!
//! ## Ownership and lifetimes
//! `TriageState` owns every string and result it holds so reducers never
//! borrow from network buffers or worker threads.
//!
//! ## Error model
//! Reducers do not fail. Stale completions are reported as
//! [`CompletionOutcome::Stale`] and leave state untouched; request failures
//! become one uniform error message.
//!
//! ## Time
//! No method reads the wall clock. Callers pass `now_ms`, so the reveal delay
//! is driven by whatever clock the caller injects.

use std::collections::VecDeque;

use soc_triage_analysis_contract::{AnalysisResult, SeverityClass};

/// Default pause between a stored result and its reveal.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 600;

/// User-facing message shown for every failed analysis.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed. Check connectivity and retry.";

/// Fixed sample alerts offered as input shortcuts.
pub const SAMPLE_ALERTS: [&str; 3] = [
    "Multiple failed SSH login attempts detected from a single IP",
    "Suspicious PowerShell execution with encoded command",
    "Outbound traffic spike to an unknown external domain detected",
];

/// Monotonic identifier assigned to each submission.
pub type RequestId = u64;

/// One successful analysis recorded in session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Alert text as submitted.
    pub input: String,
    /// Verdict returned for that text.
    pub output: AnalysisResult,
}

/// Submission handed to the orchestrator for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Identifier the completion must echo back.
    pub request_id: RequestId,
    /// Alert text to send.
    pub alert_text: String,
}

/// Result of [`TriageState::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; nothing changed and nothing should be sent.
    Skipped,
    /// Request started; the caller must execute it.
    Started(PendingRequest),
}

/// Result of applying a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Completion matched the latest submission and was applied.
    Applied,
    /// Completion belonged to a superseded or unknown request and was dropped.
    Stale,
}

/// Coarse lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriagePhase {
    /// Waiting for input.
    Idle,
    /// Request in flight.
    Submitting,
    /// Result stored, reveal pending.
    Revealing,
    /// Result visible.
    ShowingResult,
    /// Last request failed.
    Failed,
}

/// Render-ready projection of one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    /// Attack category.
    pub threat_type: String,
    /// MITRE ATT&CK technique.
    pub mitre_technique: String,
    /// Impact summary.
    pub impact: String,
    /// Severity label as reported by the service.
    pub severity: String,
    /// Display class selected from the label.
    pub severity_class: SeverityClass,
    /// Ordered mitigation steps.
    pub mitigation_steps: Vec<String>,
}

impl From<&AnalysisResult> for ResultView {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            threat_type: result.threat_type.clone(),
            mitre_technique: result.mitre_technique.clone(),
            impact: result.impact.clone(),
            severity: result.severity.clone(),
            severity_class: result.severity_class(),
            mitigation_steps: result.mitigation_steps.clone(),
        }
    }
}

/// What the result area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageView {
    /// Nothing to show yet.
    Idle,
    /// Loading skeleton.
    Loading,
    /// Skeleton gone, result not yet revealed.
    Revealing,
    /// Revealed result.
    Result(ResultView),
    /// Uniform failure message.
    Error(String),
}

/// Triage session state machine.
#[derive(Debug, Clone)]
pub struct TriageState {
    input: String,
    loading: bool,
    result: Option<AnalysisResult>,
    show_result: bool,
    error: Option<String>,
    history: VecDeque<HistoryEntry>,
    reveal_delay_ms: u64,
    reveal_at_ms: Option<u64>,
    next_request_id: RequestId,
    in_flight: Option<PendingRequest>,
}

impl TriageState {
    /// Creates an idle session with the given reveal delay.
    pub fn new(reveal_delay_ms: u64) -> Self {
        Self {
            input: String::new(),
            loading: false,
            result: None,
            show_result: false,
            error: None,
            history: VecDeque::new(),
            reveal_delay_ms,
            reveal_at_ms: None,
            next_request_id: 1,
            in_flight: None,
        }
    }

    /// Returns current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces input text.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Prefills input with sample `index` (zero-based).
    ///
    /// Returns `false` and leaves input unchanged for an out-of-range index.
    pub fn apply_sample(&mut self, index: usize) -> bool {
        match SAMPLE_ALERTS.get(index) {
            Some(sample) => {
                self.input = (*sample).to_string();
                true
            }
            None => false,
        }
    }

    /// Returns `true` when the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Starts a submission from the current input.
    ///
    /// A blank input is a no-op. Submitting while a request is in flight is
    /// accepted; the new request supersedes the old one, whose completion will
    /// later be dropped as stale.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.input.trim().is_empty() {
            return SubmitOutcome::Skipped;
        }

        let request = PendingRequest {
            request_id: self.next_request_id,
            alert_text: self.input.clone(),
        };
        self.next_request_id = self.next_request_id.saturating_add(1);

        self.result = None;
        self.error = None;
        self.show_result = false;
        self.reveal_at_ms = None;
        self.loading = true;
        self.in_flight = Some(request.clone());

        SubmitOutcome::Started(request)
    }

    /// Applies a successful completion received at `now_ms`.
    pub fn on_success(
        &mut self,
        request_id: RequestId,
        result: AnalysisResult,
        now_ms: u64,
    ) -> CompletionOutcome {
        let Some(request) = self.take_in_flight(request_id) else {
            return CompletionOutcome::Stale;
        };

        self.history.push_front(HistoryEntry {
            input: request.alert_text,
            output: result.clone(),
        });
        self.result = Some(result);
        self.error = None;
        self.loading = false;

        if self.reveal_delay_ms == 0 {
            self.show_result = true;
        } else {
            self.reveal_at_ms = Some(now_ms.saturating_add(self.reveal_delay_ms));
        }

        CompletionOutcome::Applied
    }

    /// Applies a failed completion.
    pub fn on_failure(&mut self, request_id: RequestId) -> CompletionOutcome {
        if self.take_in_flight(request_id).is_none() {
            return CompletionOutcome::Stale;
        }

        self.loading = false;
        self.result = None;
        self.show_result = false;
        self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());

        CompletionOutcome::Applied
    }

    /// Advances the reveal timer. Returns `true` when the result became
    /// visible on this tick.
    pub fn on_tick(&mut self, now_ms: u64) -> bool {
        if let Some(deadline) = self.reveal_at_ms
            && now_ms >= deadline
            && self.result.is_some()
        {
            self.reveal_at_ms = None;
            self.show_result = true;
            return true;
        }

        false
    }

    /// Returns `true` while a request is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Returns the stored result, revealed or not.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Returns `true` once the stored result may be displayed.
    pub fn show_result(&self) -> bool {
        self.show_result
    }

    /// Returns the user-facing error, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns history, newest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Returns the request id currently awaited, if any.
    pub fn in_flight_request_id(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|request| request.request_id)
    }

    /// Returns the pending reveal deadline, if any.
    pub fn reveal_deadline_ms(&self) -> Option<u64> {
        self.reveal_at_ms
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> TriagePhase {
        if self.loading {
            TriagePhase::Submitting
        } else if self.error.is_some() {
            TriagePhase::Failed
        } else if self.show_result {
            TriagePhase::ShowingResult
        } else if self.result.is_some() {
            TriagePhase::Revealing
        } else {
            TriagePhase::Idle
        }
    }

    /// Projects state into what the result area should render.
    pub fn view(&self) -> TriageView {
        match self.phase() {
            TriagePhase::Idle => TriageView::Idle,
            TriagePhase::Submitting => TriageView::Loading,
            TriagePhase::Revealing => TriageView::Revealing,
            TriagePhase::ShowingResult => match &self.result {
                Some(result) => TriageView::Result(ResultView::from(result)),
                None => TriageView::Idle,
            },
            TriagePhase::Failed => TriageView::Error(self.error.clone().unwrap_or_default()),
        }
    }

    fn take_in_flight(&mut self, request_id: RequestId) -> Option<PendingRequest> {
        if self.in_flight_request_id() != Some(request_id) {
            return None;
        }

        self.in_flight.take()
    }
}

impl Default for TriageState {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_DELAY_MS)
    }
}
