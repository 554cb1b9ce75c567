//! Print the effective escalation ladder

use crate::defaults;
use nudge_core::{Tier, TriggerKind};

fn format_tier(tier: &Tier) -> String {
    let trigger = match tier.trigger {
        TriggerKind::Scheduled => "scheduled",
        TriggerKind::Departure => "departure",
    };
    format!(
        "  {:<2} {:<14} after {:>6}ms, engagement >= {:.1} [{}]",
        tier.rank, tier.id, tier.min_elapsed_ms, tier.min_engagement, trigger
    )
}

pub fn run(file: Option<&str>) -> anyhow::Result<()> {
    let ladder = defaults::load_ladder(file)?;

    println!("Escalation ladder ({} tiers)", ladder.tiers().len());
    println!("============================");
    for tier in ladder.tiers() {
        println!("{}", format_tier(tier));
    }
    Ok(())
}
