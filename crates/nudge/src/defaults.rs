//! Built-in ladder and ladder-file loading

use anyhow::Context;
use nudge_core::{Ladder, Tier, TriggerKind};
use std::path::Path;

/// The stock escalation ladder: three scheduled rungs plus one
/// departure-only rescue tier.
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier {
            id: "soft-banner".to_string(),
            rank: 1,
            min_elapsed_ms: 15_000,
            min_engagement: 0.0,
            trigger: TriggerKind::Scheduled,
        },
        Tier {
            id: "feature-tour".to_string(),
            rank: 2,
            min_elapsed_ms: 45_000,
            min_engagement: 3.0,
            trigger: TriggerKind::Scheduled,
        },
        Tier {
            id: "signup-offer".to_string(),
            rank: 3,
            min_elapsed_ms: 90_000,
            min_engagement: 6.0,
            trigger: TriggerKind::Scheduled,
        },
        Tier {
            id: "exit-rescue".to_string(),
            rank: 4,
            min_elapsed_ms: 0,
            min_engagement: 0.0,
            trigger: TriggerKind::Departure,
        },
    ]
}

/// Load a ladder from a JSON file, or the built-in default when no file is
/// given.
pub fn load_ladder(file: Option<&str>) -> anyhow::Result<Ladder> {
    let tiers = match file {
        Some(path) => {
            let content = std::fs::read_to_string(Path::new(path))
                .with_context(|| format!("reading ladder file {}", path))?;
            serde_json::from_str::<Vec<Tier>>(&content)
                .with_context(|| format!("parsing ladder file {}", path))?
        }
        None => default_tiers(),
    };

    Ladder::new(tiers).context("invalid ladder")
}
