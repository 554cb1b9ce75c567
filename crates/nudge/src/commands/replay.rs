//! Replay a recorded event trace through the orchestrator
//!
//! The trace is JSONL: one `{"at_ms": ..., "event": ...}` entry per line,
//! with times as session offsets. Periodic ticks are not part of the trace;
//! they are synthesized from the orchestrator's own wake hints, the same way
//! a live host driver would schedule them.

use crate::defaults;
use chrono::Utc;
use nudge_core::{
    AnalyticsEvent, AnalyticsKind, Config, DepartureSignal, Event, EventKind, Orchestrator,
    PresentationSink, SignalKind,
};
use nudge_telemetry::{atomic_write, EventLog, Paths, PromptRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum TraceEvent {
    PointerMove,
    Scroll,
    Click,
    PointerLeftTop,
    PageUnload,
    Dismiss,
    Convert,
}

#[derive(Debug, Deserialize)]
struct TraceEntry {
    at_ms: u64,
    #[serde(flatten)]
    event: TraceEvent,
}

impl From<TraceEvent> for EventKind {
    fn from(event: TraceEvent) -> Self {
        match event {
            TraceEvent::PointerMove => EventKind::Interaction(SignalKind::PointerMove),
            TraceEvent::Scroll => EventKind::Interaction(SignalKind::Scroll),
            TraceEvent::Click => EventKind::Interaction(SignalKind::Click),
            TraceEvent::PointerLeftTop => EventKind::Departure(DepartureSignal::PointerLeftTop),
            TraceEvent::PageUnload => EventKind::Departure(DepartureSignal::PageUnload),
            TraceEvent::Dismiss => EventKind::Dismiss,
            TraceEvent::Convert => EventKind::Convert,
        }
    }
}

/// Prints decisions as they happen and optionally persists analytics.
struct ReplaySink {
    session_id: String,
    departure_ids: HashSet<String>,
    log: Option<EventLog>,
}

impl PresentationSink for ReplaySink {
    fn present(&mut self, tier_id: &str) {
        println!("  -> present {}", tier_id);
    }

    fn hide(&mut self) {
        println!("  -> hide");
    }

    fn record(&mut self, event: &AnalyticsEvent) {
        let kind = match event.kind {
            AnalyticsKind::Shown => "shown",
            AnalyticsKind::Dismissed => "dismissed",
            AnalyticsKind::Converted => "converted",
        };
        println!(
            "  [{}] tier={} elapsed={}ms score={:.1}",
            kind,
            event.tier_id.as_deref().unwrap_or("-"),
            event.elapsed_ms,
            event.engagement_score
        );

        if let Some(log) = &self.log {
            let record = PromptRecord {
                session_id: self.session_id.clone(),
                kind: kind.to_string(),
                tier_id: event.tier_id.clone(),
                elapsed_ms: event.elapsed_ms,
                engagement_score: event.engagement_score,
                timestamp: Utc::now(),
                departure: event
                    .tier_id
                    .as_deref()
                    .is_some_and(|id| self.departure_ids.contains(id)),
            };
            // Fire-and-forget: a failed analytics write never affects replay
            log.append(&record).ok();
        }
    }
}

/// Deliver synthesized ticks up to `upto`, following the wake hints.
fn drain_ticks<S: PresentationSink>(orch: &mut Orchestrator<S>, clock: &mut u64, upto: u64) {
    while let Some(wake) = orch.next_wake_at(*clock) {
        if wake > upto {
            break;
        }
        orch.handle(Event {
            at_ms: wake,
            kind: EventKind::Tick,
        });
        *clock = wake;
    }
}

fn drive<S: PresentationSink>(orch: &mut Orchestrator<S>, entries: &[TraceEntry], end: u64) {
    orch.activate(0);

    let mut clock = 0u64;
    for entry in entries {
        // Ticks that would have fired before this entry come first; a
        // departure entry sharing an instant with a due tick is delivered
        // ahead of it, so departure wins the race deterministically.
        let upto = match entry.event {
            TraceEvent::PointerLeftTop | TraceEvent::PageUnload => {
                entry.at_ms.saturating_sub(1)
            }
            _ => entry.at_ms,
        };
        drain_ticks(orch, &mut clock, upto);

        orch.handle(Event {
            at_ms: entry.at_ms,
            kind: entry.event.into(),
        });
        // A tick due at the departure's own instant still runs, after it.
        // If the departure presented something, no wake is pending and this
        // is a no-op.
        drain_ticks(orch, &mut clock, entry.at_ms);
        clock = clock.max(entry.at_ms);
    }

    let upto = end.max(clock);
    drain_ticks(orch, &mut clock, upto);
}

fn load_trace(path: &Path) -> anyhow::Result<Vec<TraceEntry>> {
    let mut entries: Vec<TraceEntry> = EventLog::new(path).read_all()?;
    if entries.is_empty() {
        anyhow::bail!("no events in trace {}", path.display());
    }
    entries.sort_by_key(|e| e.at_ms);
    Ok(entries)
}

pub fn run(
    file: &str,
    ladder_file: Option<&str>,
    record: bool,
    until: Option<u64>,
) -> anyhow::Result<()> {
    let ladder = defaults::load_ladder(ladder_file)?;
    let departure_ids = ladder
        .tiers()
        .iter()
        .filter(|t| t.trigger == nudge_core::TriggerKind::Departure)
        .map(|t| t.id.clone())
        .collect();

    let paths = Paths::new()?;
    let log = record.then(|| EventLog::new(paths.sessions_file()));

    let sink = ReplaySink {
        session_id: uuid::Uuid::new_v4().to_string(),
        departure_ids,
        log,
    };
    let mut orch = Orchestrator::new(Config::new(), ladder, sink);

    let entries = load_trace(Path::new(file))?;
    let end = until.unwrap_or_else(|| entries.last().map(|e| e.at_ms).unwrap_or(0));

    println!("Replaying {} events from {}", entries.len(), file);
    drive(&mut orch, &entries, end);

    if let Some(state) = orch.state() {
        println!();
        println!("Phase: {:?}", orch.phase());
        println!("Engagement score: {:.1}", state.engagement_score);
        println!("Shown tiers: {:?}", state.shown_tier_ids);
        println!("Dismissals: {}", state.dismiss_count);

        if record {
            let snapshot = serde_json::to_string_pretty(state)?;
            atomic_write(&paths.snapshot_file(), snapshot.as_bytes())?;
        }
    }

    Ok(())
}
