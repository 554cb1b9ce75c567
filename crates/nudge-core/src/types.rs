//! Core types for retention prompt scheduling

use serde::{Deserialize, Serialize};

/// Interaction signal kinds, ordered by intentionality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    PointerMove,
    Scroll,
    Click,
}

/// Signals that the visitor may be about to leave the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartureSignal {
    /// Pointer crossed above the top edge of the surface
    PointerLeftTop,
    /// Page-level dismissal attempt
    PageUnload,
}

/// How a tier may be triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Shown by the periodic eligibility check
    Scheduled,
    /// Shown only in reaction to a departure event
    Departure,
}

/// One rung of the escalation ladder (immutable, defined at startup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier {
    pub id: String,
    /// Total order used for escalation sequencing
    pub rank: u32,
    /// Minimum session age before this tier is eligible
    pub min_elapsed_ms: u64,
    /// Minimum accumulated engagement score (0 for time-only tiers)
    #[serde(default)]
    pub min_engagement: f64,
    #[serde(default = "default_trigger")]
    pub trigger: TriggerKind,
}

fn default_trigger() -> TriggerKind {
    TriggerKind::Scheduled
}

/// Orchestrator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No session, surface not yet active
    Idle,
    /// No active tier, periodic check running
    Scheduling,
    /// One tier visible, periodic check paused
    Presenting,
    /// Absorbing; no further transitions
    Terminated,
}

/// Mutable per-session record, written only by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub started_at_ms: u64,
    /// Monotone non-decreasing
    pub engagement_score: f64,
    /// Presentation order preserved; each id appears at most once
    pub shown_tier_ids: Vec<String>,
    /// At most one tier visible at any instant
    pub active_tier_id: Option<String>,
    /// Dismissals without conversion
    pub dismiss_count: u32,
    #[serde(default)]
    pub terminated: bool,
}

impl SessionState {
    pub fn new(started_at_ms: u64) -> Self {
        Self {
            started_at_ms,
            engagement_score: 0.0,
            shown_tier_ids: Vec::new(),
            active_tier_id: None,
            dismiss_count: 0,
            terminated: false,
        }
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }

    pub fn has_shown(&self, tier_id: &str) -> bool {
        self.shown_tier_ids.iter().any(|id| id == tier_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_new() {
        let state = SessionState::new(100);
        assert_eq!(state.started_at_ms, 100);
        assert_eq!(state.engagement_score, 0.0);
        assert!(state.shown_tier_ids.is_empty());
        assert!(state.active_tier_id.is_none());
        assert!(!state.terminated);
    }

    #[test]
    fn test_elapsed_saturates() {
        let state = SessionState::new(1000);
        assert_eq!(state.elapsed_ms(4000), 3000);
        assert_eq!(state.elapsed_ms(500), 0);
    }

    #[test]
    fn test_tier_roundtrip() {
        let tier = Tier {
            id: "exit-rescue".to_string(),
            rank: 4,
            min_elapsed_ms: 0,
            min_engagement: 0.0,
            trigger: TriggerKind::Departure,
        };

        let json = serde_json::to_string(&tier).unwrap();
        let parsed: Tier = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, "exit-rescue");
        assert_eq!(parsed.trigger, TriggerKind::Departure);
    }

    #[test]
    fn test_tier_defaults_to_scheduled() {
        let json = r#"{"id":"soft-banner","rank":1,"min_elapsed_ms":15000}"#;
        let parsed: Tier = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.trigger, TriggerKind::Scheduled);
        assert_eq!(parsed.min_engagement, 0.0);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut state = SessionState::new(0);
        state.shown_tier_ids.push("soft-banner".to_string());
        state.active_tier_id = Some("soft-banner".to_string());
        state.engagement_score = 4.5;

        let json = serde_json::to_string(&state).unwrap();
        let parsed: SessionState = serde_json::from_str(&json).unwrap();

        assert!(parsed.has_shown("soft-banner"));
        assert_eq!(parsed.active_tier_id.as_deref(), Some("soft-banner"));
        assert_eq!(parsed.engagement_score, 4.5);
    }
}
