//! Session controller tying UI state, the analysis client, and a clock.
//!
//! The controller never performs network IO on its own thread. [`submit`]
//! returns an [`AnalysisJob`] the caller runs wherever it likes (a worker
//! thread in the binary, inline in tests) and feeds back through [`apply`].
//!
//! [`submit`]: TriageSession::submit
//! [`apply`]: TriageSession::apply

use soc_triage_analysis_contract::{AnalysisResult, is_known_severity};
use soc_triage_client::{AnalysisClient, ClientError, FailureKind, classify_failure};
use soc_triage_ui::{
    CompletionOutcome, PendingRequest, RequestId, SubmitOutcome, TriageState, TriageView,
};

use crate::alert_preview;
use crate::clock::Clock;

/// Work item produced by a submission.
#[derive(Clone)]
pub struct AnalysisJob {
    request: PendingRequest,
    client: AnalysisClient,
}

impl AnalysisJob {
    /// Returns the request id this job will report.
    pub fn request_id(&self) -> RequestId {
        self.request.request_id
    }

    /// Executes the request. Blocks until the transport returns.
    pub fn run(self) -> AnalysisCompletion {
        let outcome = self.client.analyze(&self.request.alert_text);
        AnalysisCompletion {
            request_id: self.request.request_id,
            outcome,
        }
    }
}

/// Completion reported back to the session.
#[derive(Debug)]
pub struct AnalysisCompletion {
    /// Request this completion belongs to.
    pub request_id: RequestId,
    /// Verdict or failure.
    pub outcome: Result<AnalysisResult, ClientError>,
}

/// Result of [`TriageSession::submit_if_ready`].
pub enum Submission {
    /// Request started; the caller must run the job.
    Started(AnalysisJob),
    /// A request is already in flight; nothing was sent.
    Busy,
    /// Input is blank; nothing was sent.
    Blank,
}

/// One interactive triage session.
pub struct TriageSession<C: Clock> {
    state: TriageState,
    client: AnalysisClient,
    clock: C,
}

impl<C: Clock> TriageSession<C> {
    /// Creates an idle session.
    pub fn new(client: AnalysisClient, clock: C, reveal_delay_ms: u64) -> Self {
        Self {
            state: TriageState::new(reveal_delay_ms),
            client,
            clock,
        }
    }

    /// Returns the underlying state.
    pub fn state(&self) -> &TriageState {
        &self.state
    }

    /// Returns the current view projection.
    pub fn view(&self) -> TriageView {
        self.state.view()
    }

    /// Replaces input text.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.state.set_input(input);
    }

    /// Prefills input with sample `index` (zero-based).
    pub fn apply_sample(&mut self, index: usize) -> bool {
        self.state.apply_sample(index)
    }

    /// Starts a submission from the current input.
    ///
    /// Returns `None` when the input is blank; nothing is sent in that case.
    pub fn submit(&mut self) -> Option<AnalysisJob> {
        match self.state.submit() {
            SubmitOutcome::Skipped => {
                tracing::debug!("submit skipped: alert text is blank");
                None
            }
            SubmitOutcome::Started(request) => {
                tracing::info!(
                    request_id = request.request_id,
                    endpoint = %self.client.endpoint(),
                    alert = %alert_preview(&request.alert_text),
                    "analysis submitted"
                );
                Some(AnalysisJob {
                    request,
                    client: self.client.clone(),
                })
            }
        }
    }

    /// Starts a submission only when the submit affordance is enabled.
    ///
    /// Unlike [`submit`](Self::submit), this never supersedes a request that
    /// is still in flight.
    pub fn submit_if_ready(&mut self) -> Submission {
        if self.state.can_submit() {
            return match self.submit() {
                Some(job) => Submission::Started(job),
                None => Submission::Blank,
            };
        }

        if self.state.loading() {
            tracing::debug!(
                awaited = ?self.state.in_flight_request_id(),
                "submit ignored: analysis already in progress"
            );
            Submission::Busy
        } else {
            Submission::Blank
        }
    }

    /// Applies a completion using the session clock.
    pub fn apply(&mut self, completion: AnalysisCompletion) -> CompletionOutcome {
        let request_id = completion.request_id;
        let outcome = match completion.outcome {
            Ok(result) => {
                let severity = result.severity.clone();
                let outcome = self
                    .state
                    .on_success(request_id, result, self.clock.now_ms());
                if outcome == CompletionOutcome::Applied {
                    tracing::info!(
                        request_id,
                        severity = %severity,
                        history_len = self.state.history().len(),
                        "analysis completed"
                    );
                    if !is_known_severity(&severity) {
                        tracing::debug!(
                            request_id,
                            severity = %severity,
                            "unrecognized severity label, using default display"
                        );
                    }
                }
                outcome
            }
            Err(error) => {
                let outcome = self.state.on_failure(request_id);
                if outcome == CompletionOutcome::Applied {
                    log_failure(request_id, &error);
                }
                outcome
            }
        };

        if outcome == CompletionOutcome::Stale {
            tracing::warn!(
                request_id,
                awaited = ?self.state.in_flight_request_id(),
                "discarded stale analysis completion"
            );
        }

        outcome
    }

    /// Advances the reveal timer. Returns `true` when the result became
    /// visible.
    pub fn tick(&mut self) -> bool {
        let revealed = self.state.on_tick(self.clock.now_ms());
        if revealed {
            tracing::debug!("analysis result revealed");
        }
        revealed
    }

    /// Submits and runs one request on the calling thread.
    ///
    /// Returns `None` when the input was blank.
    pub fn analyze_blocking(&mut self) -> Option<CompletionOutcome> {
        let job = self.submit()?;
        Some(self.apply(job.run()))
    }
}

fn log_failure(request_id: RequestId, error: &ClientError) {
    let kind = classify_failure(error);
    match (kind, error) {
        (FailureKind::Http, ClientError::Http { status, body }) => tracing::error!(
            request_id,
            kind = kind.as_str(),
            status,
            body_len = body.len(),
            body = %alert_preview(body),
            "analysis failed"
        ),
        _ => tracing::error!(
            request_id,
            kind = kind.as_str(),
            error = %error,
            "analysis failed"
        ),
    }
}
