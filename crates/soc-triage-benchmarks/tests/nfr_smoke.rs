//! Benchmark smoke test for the submit/complete/reveal/render loop.

use std::sync::Arc;
use std::time::Instant;

use soc_triage_app::render::{render_history, render_view};
use soc_triage_app::{ManualClock, TriageSession};
use soc_triage_client::{AnalysisClient, AnalysisTransport, ClientError, TransportResponse};
use soc_triage_ui::SAMPLE_ALERTS;
use url::Url;

const CANNED_BODY: &str = r#"{"threat_type":"Malware","mitre_technique":"T1059","severity":"Critical","impact":"Host compromise","mitigation_steps":["Isolate host","Collect memory image","Reimage"]}"#;

struct CannedTransport;

impl AnalysisTransport for CannedTransport {
    fn post_json(&self, _endpoint: &Url, _body: &[u8]) -> Result<TransportResponse, ClientError> {
        Ok(TransportResponse {
            status: 200,
            body: CANNED_BODY.to_string(),
        })
    }
}

#[test]
fn benchmark_session_loop_smoke_prints_latency() {
    let client = AnalysisClient::new("http://127.0.0.1:8000", Arc::new(CannedTransport))
        .expect("client should build");
    let clock = ManualClock::new(0);
    let mut session = TriageSession::new(client, clock.clone(), 600);

    let start = Instant::now();
    let mut rendered_bytes = 0usize;

    for index in 0..1_000_usize {
        session.apply_sample(index % SAMPLE_ALERTS.len());
        session.analyze_blocking();
        clock.advance(600);
        session.tick();
        rendered_bytes += render_view(&session.view()).map_or(0, |text| text.len());
    }
    rendered_bytes += render_history(session.state().history()).len();

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_session_loop_elapsed_ms={elapsed_ms}");
    println!("benchmark_rendered_bytes={rendered_bytes}");

    assert_eq!(session.state().history().len(), 1_000);
    assert!(
        elapsed_ms < 5_000,
        "session loop smoke benchmark should stay bounded"
    );
}
