//! Engagement scoring from raw interaction signals
//!
//! Converts pointer movement, scrolling, and clicks into a monotonically
//! non-decreasing score. The accumulator owns only per-kind counts; the
//! orchestrator is the sole writer of the score itself.

use crate::config::Config;
use crate::types::SignalKind;

#[derive(Debug, Clone, Default)]
pub struct EngagementAccumulator {
    pointer_moves: u32,
    scrolls: u32,
    clicks: u32,
}

impl EngagementAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score delta for one signal. The first occurrence of a kind contributes
    /// its full weight; the n-th repeat contributes `weight * repeat_decay^n`,
    /// so a single frantic scroll cannot dominate the score.
    pub fn weigh(&mut self, kind: SignalKind, config: &Config) -> f64 {
        let count = match kind {
            SignalKind::PointerMove => &mut self.pointer_moves,
            SignalKind::Scroll => &mut self.scrolls,
            SignalKind::Click => &mut self.clicks,
        };
        let repeats = *count;
        *count = count.saturating_add(1);

        config.weights.weight(kind) * config.repeat_decay.powi(repeats as i32)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
