//! Departure detection with one-shot cool-down
//!
//! Watches for "about to leave" signals and raises at most one departure
//! event per cool-down window, so one erratic pointer motion cannot produce
//! a storm of departure events. After the window elapses the guard re-arms,
//! allowing a second genuine departure later in a long session.

use crate::types::DepartureSignal;

#[derive(Debug, Clone)]
pub struct DepartureDetector {
    cooldown_ms: u64,
    last_fired_at_ms: Option<u64>,
}

impl DepartureDetector {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown_ms,
            last_fired_at_ms: None,
        }
    }

    /// Returns true exactly when a departure event fires. Signals arriving
    /// within the cool-down window are ignored, not queued.
    pub fn observe(&mut self, _signal: DepartureSignal, now_ms: u64) -> bool {
        if let Some(fired_at) = self.last_fired_at_ms {
            if now_ms.saturating_sub(fired_at) < self.cooldown_ms {
                return false;
            }
        }
        self.last_fired_at_ms = Some(now_ms);
        true
    }

    /// Re-arm the one-shot guard. Session clocks restart at zero, so a
    /// fire recorded in a previous session must not suppress the next one.
    pub fn reset(&mut self) {
        self.last_fired_at_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_signal_fires() {
        let mut detector = DepartureDetector::new(30_000);
        assert!(detector.observe(DepartureSignal::PointerLeftTop, 500));
    }

    #[test]
    fn test_cooldown_suppresses_storm() {
        let mut detector = DepartureDetector::new(30_000);
        assert!(detector.observe(DepartureSignal::PointerLeftTop, 500));
        assert!(!detector.observe(DepartureSignal::PointerLeftTop, 600));
        assert!(!detector.observe(DepartureSignal::PageUnload, 15_000));
        assert!(!detector.observe(DepartureSignal::PointerLeftTop, 30_499));
    }

    #[test]
    fn test_rearms_after_cooldown() {
        let mut detector = DepartureDetector::new(30_000);
        assert!(detector.observe(DepartureSignal::PointerLeftTop, 500));
        assert!(detector.observe(DepartureSignal::PageUnload, 30_500));
    }

    #[test]
    fn test_reset_rearms_immediately() {
        let mut detector = DepartureDetector::new(30_000);
        assert!(detector.observe(DepartureSignal::PointerLeftTop, 500));
        assert!(!detector.observe(DepartureSignal::PointerLeftTop, 600));

        detector.reset();
        // A fresh session clock can sit before the old fire instant.
        assert!(detector.observe(DepartureSignal::PointerLeftTop, 400));
    }

    #[test]
    fn test_both_signal_kinds_qualify() {
        let mut detector = DepartureDetector::new(30_000);
        assert!(detector.observe(DepartureSignal::PageUnload, 0));

        let mut detector = DepartureDetector::new(30_000);
        assert!(detector.observe(DepartureSignal::PointerLeftTop, 0));
    }
}
