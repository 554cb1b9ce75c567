use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nudge")]
#[command(version)]
#[command(about = "Escalating retention prompt scheduling for interactive surfaces")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a recorded event trace through the scheduler
    Replay {
        /// Path to trace JSONL (one timestamped event per line)
        #[arg(short, long)]
        file: String,

        /// Ladder definition JSON (built-in ladder if omitted)
        #[arg(short, long)]
        ladder: Option<String>,

        /// Append analytics records to the session log
        #[arg(long)]
        record: bool,

        /// Keep ticking until this session offset after the last trace event
        #[arg(long)]
        until: Option<u64>,
    },

    /// Summarize the session analytics log
    Report {
        /// Show statistics summary only
        #[arg(long)]
        stats: bool,
    },

    /// Print the effective escalation ladder
    Ladder {
        /// Ladder definition JSON (built-in ladder if omitted)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Print version information
    Version,
}
