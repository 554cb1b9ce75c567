//! Summarize the session analytics log

use nudge_telemetry::{EventLog, Paths, PromptRecord};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
struct TierCounts {
    shown: usize,
    dismissed: usize,
    converted: usize,
}

fn count_by_tier(records: &[PromptRecord]) -> BTreeMap<String, TierCounts> {
    let mut by_tier: BTreeMap<String, TierCounts> = BTreeMap::new();
    for record in records {
        let tier = record.tier_id.clone().unwrap_or_else(|| "-".to_string());
        let counts = by_tier.entry(tier).or_default();
        match record.kind.as_str() {
            "shown" => counts.shown += 1,
            "dismissed" => counts.dismissed += 1,
            "converted" => counts.converted += 1,
            _ => {}
        }
    }
    by_tier
}

fn compute_stats(records: &[PromptRecord]) -> String {
    if records.is_empty() {
        return "No prompt events to analyze.".to_string();
    }

    let sessions: std::collections::HashSet<_> =
        records.iter().map(|r| r.session_id.as_str()).collect();
    let shown = records.iter().filter(|r| r.kind == "shown").count();
    let dismissed = records.iter().filter(|r| r.kind == "dismissed").count();
    let converted = records.iter().filter(|r| r.kind == "converted").count();
    let conversion_rate = if shown > 0 {
        converted as f64 / shown as f64 * 100.0
    } else {
        0.0
    };

    format!(
        "Sessions: {}\n\
         Prompts shown: {}\n\
         Dismissed: {}\n\
         Converted: {}\n\
         Conversion rate: {:.1}%",
        sessions.len(),
        shown,
        dismissed,
        converted,
        conversion_rate
    )
}

pub fn run(stats: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let records: Vec<PromptRecord> = EventLog::new(paths.sessions_file()).read_all()?;

    if records.is_empty() {
        println!("No session history");
        return Ok(());
    }

    if stats {
        println!("{}", compute_stats(&records));
        return Ok(());
    }

    println!("Per-tier summary");
    println!("================");
    for (tier, counts) in count_by_tier(&records) {
        println!(
            "  {:<14} shown:{} dismissed:{} converted:{}",
            tier, counts.shown, counts.dismissed, counts.converted
        );
    }
    println!();
    println!("{}", compute_stats(&records));
    Ok(())
}
