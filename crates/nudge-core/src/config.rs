//! Configuration for prompt scheduling

use crate::types::SignalKind;
use serde::{Deserialize, Serialize};

/// Score weight per interaction signal kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalWeights {
    pub click: f64,
    pub scroll: f64,
    pub pointer_move: f64,
}

impl SignalWeights {
    pub fn new() -> Self {
        // Click > scroll > pointer move, reflecting intentionality
        Self {
            click: 3.0,
            scroll: 1.5,
            pointer_move: 0.5,
        }
    }

    pub fn weight(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::Click => self.click,
            SignalKind::Scroll => self.scroll,
            SignalKind::PointerMove => self.pointer_move,
        }
    }
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self::new()
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Interval of the periodic eligibility check
    pub tick_interval_ms: u64,

    /// Departure detector one-shot cool-down
    pub departure_cooldown_ms: u64,

    /// Backoff after a dismissal, scaled by dismiss count
    pub dismiss_backoff_ms: u64,

    /// Multiplier applied per repeat of an already-recorded signal kind
    pub repeat_decay: f64,

    pub weights: SignalWeights,
}

impl Config {
    pub fn new() -> Self {
        Self {
            tick_interval_ms: 1_000,
            departure_cooldown_ms: 30_000,
            dismiss_backoff_ms: 5_000,
            repeat_decay: 0.5,
            weights: SignalWeights::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
