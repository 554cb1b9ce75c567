//! Single-writer state machine coordinating timers, engagement, and departure
//!
//! All event sources funnel into one reducer entry point, `handle`. Each call
//! is one atomic reduction over `&mut self`: a second event cannot begin
//! processing until the first has fully updated SessionState and issued its
//! presentation decision. This replaces scattered per-source callbacks each
//! mutating their own flags.

use crate::config::Config;
use crate::departure::DepartureDetector;
use crate::engagement::EngagementAccumulator;
use crate::ladder::Ladder;
use crate::types::{DepartureSignal, Phase, SessionState, SignalKind, Tier, TriggerKind};
use serde::{Deserialize, Serialize};

/// An event delivered to the orchestrator, stamped with the session clock
#[derive(Debug, Clone)]
pub struct Event {
    pub at_ms: u64,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Periodic eligibility check
    Tick,
    /// Raw interaction signal
    Interaction(SignalKind),
    /// Possible departure from the surface
    Departure(DepartureSignal),
    /// Visitor dismissed the visible prompt
    Dismiss,
    /// Visitor authenticated or otherwise converted
    Convert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsKind {
    Shown,
    Dismissed,
    Converted,
}

/// Fire-and-forget analytics tuple emitted on every presentation transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub kind: AnalyticsKind,
    pub tier_id: Option<String>,
    pub elapsed_ms: u64,
    pub engagement_score: f64,
}

/// Collaborator boundary: renders prompts and receives analytics.
///
/// `record` is fire-and-forget; implementations that do not care about
/// analytics can rely on the default no-op.
pub trait PresentationSink {
    fn present(&mut self, tier_id: &str);
    fn hide(&mut self);
    fn record(&mut self, _event: &AnalyticsEvent) {}
}

/// Owns SessionState and is its sole writer. The accumulator and detector
/// only produce derived values (score deltas, departure edges); they never
/// touch the state directly.
pub struct Orchestrator<S: PresentationSink> {
    config: Config,
    ladder: Ladder,
    accumulator: EngagementAccumulator,
    detector: DepartureDetector,
    phase: Phase,
    state: Option<SessionState>,
    /// Eligibility checks are suppressed until this instant after a dismissal
    resume_after_ms: Option<u64>,
    sink: S,
}

impl<S: PresentationSink> Orchestrator<S> {
    pub fn new(config: Config, ladder: Ladder, sink: S) -> Self {
        let detector = DepartureDetector::new(config.departure_cooldown_ms);
        Self {
            config,
            ladder,
            accumulator: EngagementAccumulator::new(),
            detector,
            phase: Phase::Idle,
            state: None,
            resume_after_ms: None,
            sink,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Surface became active for an unauthenticated visitor: Idle → Scheduling.
    pub fn activate(&mut self, now_ms: u64) {
        if self.phase != Phase::Idle {
            debug_assert!(false, "activate from {:?}", self.phase);
            return;
        }
        tracing::debug!(now_ms, "session activated");
        self.state = Some(SessionState::new(now_ms));
        self.phase = Phase::Scheduling;
        self.resume_after_ms = None;
    }

    /// Surface teardown: discard the session and cancel all pending work.
    pub fn deactivate(&mut self) {
        tracing::debug!(phase = ?self.phase, "session deactivated");
        self.state = None;
        self.phase = Phase::Idle;
        self.resume_after_ms = None;
        self.accumulator.reset();
        self.detector.reset();
    }

    /// When the host driver should next deliver a Tick, or None when no
    /// wake is wanted (Presenting pauses the check; Terminated and Idle
    /// have nothing scheduled). Cancellation falls out of this: once the
    /// phase leaves Scheduling, no further wake is requested.
    pub fn next_wake_at(&self, now_ms: u64) -> Option<u64> {
        if self.phase != Phase::Scheduling {
            return None;
        }
        let next_tick = now_ms + self.config.tick_interval_ms;
        Some(match self.resume_after_ms {
            Some(resume) if resume > next_tick => resume,
            _ => next_tick,
        })
    }

    /// The reducer. One event in, at most one presentation decision out.
    pub fn handle(&mut self, event: Event) {
        // Terminated is absorbing: every further delivery is a silent no-op.
        if self.phase == Phase::Terminated || self.phase == Phase::Idle {
            return;
        }

        match event.kind {
            EventKind::Interaction(kind) => self.on_interaction(kind),
            EventKind::Tick => self.on_tick(event.at_ms),
            EventKind::Departure(signal) => self.on_departure(signal, event.at_ms),
            EventKind::Dismiss => self.on_dismiss(event.at_ms),
            EventKind::Convert => self.on_convert(event.at_ms),
        }
    }

    fn on_interaction(&mut self, kind: SignalKind) {
        let delta = self.accumulator.weigh(kind, &self.config);
        if let Some(state) = self.state.as_mut() {
            state.engagement_score += delta;
        }
    }

    fn on_tick(&mut self, now_ms: u64) {
        // Checks are paused while a tier is visible, and suppressed during
        // the post-dismissal backoff window.
        if self.phase != Phase::Scheduling {
            return;
        }
        if let Some(resume) = self.resume_after_ms {
            if now_ms < resume {
                return;
            }
            self.resume_after_ms = None;
        }

        let Some(state) = self.state.as_ref() else {
            return;
        };
        if let Some(tier) = self
            .ladder
            .next_eligible(state, now_ms, TriggerKind::Scheduled)
        {
            let tier = tier.clone();
            self.present(&tier, now_ms);
        }
    }

    fn on_departure(&mut self, signal: DepartureSignal, now_ms: u64) {
        // The detector's cool-down is consumed regardless of whether the
        // orchestrator can act on the event.
        if !self.detector.observe(signal, now_ms) {
            return;
        }
        // Departure while Presenting is ignored, not queued.
        if self.phase != Phase::Scheduling {
            return;
        }

        let Some(state) = self.state.as_ref() else {
            return;
        };
        if let Some(tier) = self
            .ladder
            .next_eligible(state, now_ms, TriggerKind::Departure)
        {
            let tier = tier.clone();
            tracing::debug!(tier = %tier.id, now_ms, "departure pre-empts scheduler");
            self.present(&tier, now_ms);
        }
    }

    fn on_dismiss(&mut self, now_ms: u64) {
        // A dismiss reply can race with conversion or teardown; with nothing
        // presented it is ignorable input, not a fault.
        if self.phase != Phase::Presenting {
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let tier_id = state.active_tier_id.take();
        state.dismiss_count += 1;

        let record = AnalyticsEvent {
            kind: AnalyticsKind::Dismissed,
            tier_id,
            elapsed_ms: state.elapsed_ms(now_ms),
            engagement_score: state.engagement_score,
        };

        // Backoff proportional to the dismiss count, so the next tier does
        // not appear the instant this one is waved away.
        let backoff = self.config.dismiss_backoff_ms * u64::from(state.dismiss_count);
        self.resume_after_ms = Some(now_ms + backoff);
        self.phase = Phase::Scheduling;

        tracing::debug!(
            dismiss_count = state.dismiss_count,
            resume_at = now_ms + backoff,
            "prompt dismissed"
        );
        self.sink.hide();
        self.sink.record(&record);
    }

    fn on_convert(&mut self, now_ms: u64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let tier_id = state.active_tier_id.take();
        state.terminated = true;

        let record = AnalyticsEvent {
            kind: AnalyticsKind::Converted,
            tier_id,
            elapsed_ms: state.elapsed_ms(now_ms),
            engagement_score: state.engagement_score,
        };

        self.phase = Phase::Terminated;
        self.resume_after_ms = None;

        tracing::info!(elapsed_ms = record.elapsed_ms, "visitor converted");
        self.sink.hide();
        self.sink.record(&record);
    }

    fn present(&mut self, tier: &Tier, now_ms: u64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        // Invariant guards: at most one active tier, no tier shown twice.
        // Programming faults, not recoverable conditions; fail safe by
        // ignoring the transition.
        if state.active_tier_id.is_some() || state.has_shown(&tier.id) {
            debug_assert!(
                false,
                "present {} with active={:?}",
                tier.id, state.active_tier_id
            );
            return;
        }

        state.shown_tier_ids.push(tier.id.clone());
        state.active_tier_id = Some(tier.id.clone());
        self.phase = Phase::Presenting;

        let record = AnalyticsEvent {
            kind: AnalyticsKind::Shown,
            tier_id: Some(tier.id.clone()),
            elapsed_ms: state.elapsed_ms(now_ms),
            engagement_score: state.engagement_score,
        };

        tracing::info!(tier = %tier.id, elapsed_ms = record.elapsed_ms, "presenting tier");
        self.sink.present(&tier.id);
        self.sink.record(&record);
    }
}
