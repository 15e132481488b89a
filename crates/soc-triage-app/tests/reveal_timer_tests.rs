//! Integration tests for the deferred result reveal.

mod common;

use soc_triage_ui::{TriagePhase, TriageView};

use common::{BRUTE_FORCE_BODY, SSH_ALERT, ScriptedTransport, session_with};

#[test]
fn reveal_timer_tests_waits_for_injected_clock() {
    let (mut session, clock) = session_with(ScriptedTransport::replying(200, BRUTE_FORCE_BODY), 600);
    clock.set(5_000);

    session.set_input(SSH_ALERT);
    session.analyze_blocking();
    assert_eq!(session.state().phase(), TriagePhase::Revealing);
    assert_eq!(session.view(), TriageView::Revealing);

    clock.advance(599);
    assert!(!session.tick());
    assert!(!session.state().show_result());

    clock.advance(1);
    assert!(session.tick());
    assert_eq!(session.state().phase(), TriagePhase::ShowingResult);
    assert!(matches!(session.view(), TriageView::Result(_)));
}

#[test]
fn reveal_timer_tests_zero_delay_reveals_on_completion() {
    let (mut session, _clock) = session_with(ScriptedTransport::replying(200, BRUTE_FORCE_BODY), 0);

    session.set_input(SSH_ALERT);
    session.analyze_blocking();
    assert!(session.state().show_result());
    assert!(!session.tick());
}

#[test]
fn reveal_timer_tests_never_shows_without_result() {
    let (mut session, clock) = session_with(ScriptedTransport::unreachable(), 600);

    session.set_input(SSH_ALERT);
    session.analyze_blocking();
    clock.advance(10_000);
    assert!(!session.tick());
    assert!(!session.state().show_result());
    assert!(session.state().result().is_none());
}
