mod cli;
mod commands;
mod defaults;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            file,
            ladder,
            record,
            until,
        } => commands::replay::run(&file, ladder.as_deref(), record, until),
        Commands::Report { stats } => commands::report::run(stats),
        Commands::Ladder { file } => commands::ladder::run(file.as_deref()),
        Commands::Version => commands::version::run(),
    }
}
