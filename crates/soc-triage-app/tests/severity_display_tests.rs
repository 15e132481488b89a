//! Integration tests for severity label display treatment.

mod common;

use soc_triage_analysis_contract::{SeverityClass, is_known_severity, severity_class};
use soc_triage_app::render::{render_view, severity_badge};

use common::{ScriptedTransport, capture_logs, session_with};

#[test]
fn severity_display_tests_maps_observed_labels() {
    let cases = [
        ("Low", SeverityClass::Low),
        ("Medium", SeverityClass::Medium),
        ("High", SeverityClass::High),
        ("Critical", SeverityClass::Low),
        ("Unknown", SeverityClass::Low),
    ];

    for (label, expected) in cases {
        assert_eq!(severity_class(label), expected, "label {label}");
        assert!(severity_badge(label, expected).contains(expected.as_str()));
    }
}

#[test]
fn severity_display_tests_known_labels_are_informational() {
    assert!(is_known_severity("Critical"));
    assert!(!is_known_severity("Unknown"));
    assert_eq!(severity_class("Unknown"), severity_class("Low"));
}

#[test]
fn severity_display_tests_unrecognized_label_is_logged_and_rendered_default() {
    let body = r#"{"threat_type":"Malware","mitre_technique":"T1059","severity":"Severe","impact":"Host compromise","mitigation_steps":["Isolate host"]}"#;
    let (mut session, _clock) = session_with(ScriptedTransport::replying(200, body), 0);

    let (_, logs) = capture_logs(|| {
        session.set_input("Encoded PowerShell spawned by winword.exe");
        session.analyze_blocking()
    });
    assert!(logs.contains("unrecognized severity label"));
    assert!(logs.contains("severity=Severe"));

    let rendered = render_view(&session.view()).expect("result should render");
    assert!(rendered.contains("[! Severe (low)]"));
}

#[test]
fn severity_display_tests_known_label_is_not_flagged() {
    let body = r#"{"threat_type":"Malware","mitre_technique":"T1059","severity":"Critical","impact":"Host compromise","mitigation_steps":["Isolate host"]}"#;
    let (mut session, _clock) = session_with(ScriptedTransport::replying(200, body), 0);

    let (_, logs) = capture_logs(|| {
        session.set_input("Encoded PowerShell spawned by winword.exe");
        session.analyze_blocking()
    });
    assert!(logs.contains("analysis completed"));
    assert!(!logs.contains("unrecognized severity label"));
}
