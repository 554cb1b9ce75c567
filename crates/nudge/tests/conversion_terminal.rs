mod common;

use common::{ev, orchestrator, sample_tiers, tick_range, tier};
use nudge_core::{AnalyticsKind, DepartureSignal, EventKind, Phase, SignalKind};

#[test]
fn test_convert_while_presenting_clears_and_terminates() {
    // Authentication success with a tier on screen empties
    // active_tier_id, terminates, and a later departure shows nothing.
    let mut orch = orchestrator(sample_tiers());
    orch.activate(0);

    tick_range(&mut orch, 1_000, 3_000);
    assert_eq!(
        orch.state().unwrap().active_tier_id.as_deref(),
        Some("soft-banner")
    );

    orch.handle(ev(3_500, EventKind::Convert));
    assert_eq!(orch.phase(), Phase::Terminated);
    assert!(orch.state().unwrap().active_tier_id.is_none());
    assert!(orch.state().unwrap().terminated);
    assert_eq!(orch.sink().hides, 1);

    orch.handle(ev(4_000, EventKind::Departure(DepartureSignal::PointerLeftTop)));
    assert_eq!(orch.sink().presented, vec!["soft-banner"]);
}

#[test]
fn test_terminated_absorbs_every_event_kind() {
    let mut orch = orchestrator(sample_tiers());
    orch.activate(0);
    orch.handle(ev(500, EventKind::Convert));

    let before_score = orch.state().unwrap().engagement_score;
    orch.handle(ev(1_000, EventKind::Tick));
    orch.handle(ev(1_100, EventKind::Interaction(SignalKind::Click)));
    orch.handle(ev(1_200, EventKind::Departure(DepartureSignal::PageUnload)));
    orch.handle(ev(1_300, EventKind::Dismiss));
    orch.handle(ev(1_400, EventKind::Convert));

    let state = orch.state().unwrap();
    assert_eq!(orch.phase(), Phase::Terminated);
    assert_eq!(state.engagement_score, before_score);
    assert!(state.shown_tier_ids.is_empty());
    assert!(state.active_tier_id.is_none());

    // Exactly one converted record, nothing after.
    let kinds: Vec<_> = orch.sink().records.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![AnalyticsKind::Converted]);
}

#[test]
fn test_no_wake_requested_after_termination() {
    let mut orch = orchestrator(sample_tiers());
    orch.activate(0);

    assert!(orch.next_wake_at(0).is_some());
    orch.handle(ev(500, EventKind::Convert));
    assert!(orch.next_wake_at(500).is_none());
}

#[test]
fn test_teardown_cancels_without_terminating() {
    let mut orch = orchestrator(vec![tier("t1", 1, 1_000, 0.0)]);
    orch.activate(0);
    orch.handle(ev(1_000, EventKind::Tick));

    orch.deactivate();
    assert_eq!(orch.phase(), Phase::Idle);
    assert!(orch.state().is_none());
    assert!(orch.next_wake_at(2_000).is_none());

    // Events after teardown are dropped on the floor.
    orch.handle(ev(3_000, EventKind::Tick));
    assert_eq!(orch.sink().presented, vec!["t1"]);
}

#[test]
fn test_converted_record_carries_session_measurements() {
    let mut orch = orchestrator(sample_tiers());
    orch.activate(0);

    orch.handle(ev(1_000, EventKind::Interaction(SignalKind::Click)));
    tick_range(&mut orch, 1_000, 3_000);
    orch.handle(ev(9_000, EventKind::Convert));

    let converted = orch
        .sink()
        .records
        .iter()
        .find(|r| r.kind == AnalyticsKind::Converted)
        .unwrap();
    assert_eq!(converted.tier_id.as_deref(), Some("soft-banner"));
    assert_eq!(converted.elapsed_ms, 9_000);
    assert!(converted.engagement_score >= 3.0);
}
