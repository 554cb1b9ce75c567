use nudge_core::{
    AnalyticsEvent, Config, Event, EventKind, Ladder, Orchestrator, PresentationSink, Tier,
    TriggerKind,
};

#[derive(Default)]
pub struct RecordingSink {
    pub presented: Vec<String>,
    pub hides: usize,
    pub records: Vec<AnalyticsEvent>,
}

impl PresentationSink for RecordingSink {
    fn present(&mut self, tier_id: &str) {
        self.presented.push(tier_id.to_string());
    }

    fn hide(&mut self) {
        self.hides += 1;
    }

    fn record(&mut self, event: &AnalyticsEvent) {
        self.records.push(event.clone());
    }
}

pub fn tier(id: &str, rank: u32, min_elapsed_ms: u64, min_engagement: f64) -> Tier {
    Tier {
        id: id.to_string(),
        rank,
        min_elapsed_ms,
        min_engagement,
        trigger: TriggerKind::Scheduled,
    }
}

pub fn departure_tier(id: &str, rank: u32, min_elapsed_ms: u64) -> Tier {
    Tier {
        id: id.to_string(),
        rank,
        min_elapsed_ms,
        min_engagement: 0.0,
        trigger: TriggerKind::Departure,
    }
}

/// Three scheduled rungs plus a departure rescue, mirroring the stock ladder
/// at test-friendly timings.
pub fn sample_tiers() -> Vec<Tier> {
    vec![
        tier("soft-banner", 1, 3_000, 0.0),
        tier("feature-tour", 2, 6_000, 3.0),
        tier("signup-offer", 3, 9_000, 6.0),
        departure_tier("exit-rescue", 4, 0),
    ]
}

pub fn orchestrator(tiers: Vec<Tier>) -> Orchestrator<RecordingSink> {
    Orchestrator::new(
        Config::new(),
        Ladder::new(tiers).unwrap(),
        RecordingSink::default(),
    )
}

pub fn ev(at_ms: u64, kind: EventKind) -> Event {
    Event { at_ms, kind }
}

/// Deliver a tick every second from `from_ms` to `to_ms` inclusive.
pub fn tick_range(orch: &mut Orchestrator<RecordingSink>, from_ms: u64, to_ms: u64) {
    let mut at = from_ms;
    while at <= to_ms {
        orch.handle(ev(at, EventKind::Tick));
        at += 1_000;
    }
}
