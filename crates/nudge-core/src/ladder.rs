//! The escalation ladder: ordered tiers with eligibility gates

use crate::types::{SessionState, Tier, TriggerKind};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LadderError {
    #[error("ladder has no tiers")]
    Empty,
    #[error("duplicate tier id: {0}")]
    DuplicateId(String),
    #[error("duplicate tier rank: {0}")]
    DuplicateRank(u32),
}

/// Immutable, rank-ordered escalation tiers. Pure lookup; holds no session
/// state of its own.
#[derive(Debug, Clone)]
pub struct Ladder {
    tiers: Vec<Tier>,
}

impl Ladder {
    pub fn new(mut tiers: Vec<Tier>) -> Result<Self, LadderError> {
        if tiers.is_empty() {
            return Err(LadderError::Empty);
        }

        let mut ids = HashSet::new();
        let mut ranks = HashSet::new();
        for tier in &tiers {
            if !ids.insert(tier.id.clone()) {
                return Err(LadderError::DuplicateId(tier.id.clone()));
            }
            if !ranks.insert(tier.rank) {
                return Err(LadderError::DuplicateRank(tier.rank));
            }
        }

        tiers.sort_by_key(|t| t.rank);
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Next tier the requesting path may show, or None.
    ///
    /// Escalation is strictly sequential within a trigger kind: the candidate
    /// is always the lowest-rank unshown tier of that kind, and it is returned
    /// only if its elapsed-time and engagement gates are both satisfied. Tiers
    /// are never skipped even when a later tier's gates already pass — this is
    /// a ladder, not a priority queue. Departure tiers are only ever returned
    /// from the departure-reaction path.
    pub fn next_eligible(
        &self,
        state: &SessionState,
        now_ms: u64,
        trigger: TriggerKind,
    ) -> Option<&Tier> {
        let candidate = self
            .tiers
            .iter()
            .filter(|t| t.trigger == trigger)
            .find(|t| !state.has_shown(&t.id))?;

        let gates_pass = state.elapsed_ms(now_ms) >= candidate.min_elapsed_ms
            && state.engagement_score >= candidate.min_engagement;

        gates_pass.then_some(candidate)
    }
}
