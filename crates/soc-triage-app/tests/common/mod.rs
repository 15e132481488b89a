//! Shared fixtures for app integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use soc_triage_analysis_contract::AnalysisResult;
use soc_triage_app::{ManualClock, TriageSession};
use soc_triage_client::{AnalysisClient, AnalysisTransport, ClientError, TransportResponse};
use url::Url;

/// SSH brute-force alert used by end-to-end scenarios.
#[allow(dead_code)]
pub const SSH_ALERT: &str = "Multiple failed SSH login attempts detected from a single IP";

/// Service body matching [`brute_force_result`].
#[allow(dead_code)]
pub const BRUTE_FORCE_BODY: &str = r#"{
    "threat_type":"Brute Force",
    "mitre_technique":"T1110",
    "severity":"High",
    "impact":"Account compromise risk",
    "mitigation_steps":["Block source IP","Enforce MFA"]
}"#;

/// Parsed form of [`BRUTE_FORCE_BODY`].
#[allow(dead_code)]
pub fn brute_force_result() -> AnalysisResult {
    AnalysisResult {
        threat_type: "Brute Force".to_string(),
        mitre_technique: "T1110".to_string(),
        severity: "High".to_string(),
        impact: "Account compromise risk".to_string(),
        mitigation_steps: vec!["Block source IP".to_string(), "Enforce MFA".to_string()],
    }
}

/// Transport that replays one scripted response and counts calls.
#[derive(Debug)]
pub struct ScriptedTransport {
    response: Result<TransportResponse, String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    /// Replies with `status` and `body` to every call.
    #[allow(dead_code)]
    pub fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Fails every call at the transport level.
    #[allow(dead_code)]
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            response: Err("connection refused".to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Returns the request bodies received so far.
    #[allow(dead_code)]
    pub fn bodies(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock should work").clone()
    }
}

impl AnalysisTransport for ScriptedTransport {
    fn post_json(&self, _endpoint: &Url, body: &[u8]) -> Result<TransportResponse, ClientError> {
        self.calls
            .lock()
            .expect("calls lock should work")
            .push(String::from_utf8_lossy(body).into_owned());
        self.response.clone().map_err(ClientError::Transport)
    }
}

/// Builds a session over `transport` with a manual clock.
#[allow(dead_code)]
pub fn session_with(
    transport: Arc<ScriptedTransport>,
    reveal_delay_ms: u64,
) -> (TriageSession<ManualClock>, ManualClock) {
    let client =
        AnalysisClient::new("http://127.0.0.1:8000", transport).expect("client should build");
    let clock = ManualClock::new(0);
    (
        TriageSession::new(client, clock.clone(), reveal_delay_ms),
        clock,
    )
}

/// In-memory log sink shared with a `tracing_subscriber` fmt writer.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer lock should work")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `action` with a debug-level subscriber and returns everything logged.
#[allow(dead_code)]
pub fn capture_logs<T>(action: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let value = tracing::subscriber::with_default(subscriber, action);
    let bytes = buffer.0.lock().expect("log buffer lock should work").clone();
    (value, String::from_utf8_lossy(&bytes).into_owned())
}
