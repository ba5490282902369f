use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use noma_stream_core::AppConfig;

mod commands;
mod fixtures;

#[derive(Parser)]
#[command(name = "noma-stream")]
#[command(author, version, about = "An anonymous, gently paced content stream for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run {
        /// Fetch moments from a NOMA API base URL instead of the bundled pool
        #[arg(short = 'r', long = "remote")]
        remote: Option<String>,
        /// Show moments in arrival order instead of the paced arrangement
        #[arg(long)]
        latest: bool,
    },
    /// Print a paced arrangement of the bundled pool and exit
    Schedule {
        /// Seed for a reproducible arrangement
        #[arg(short = 's', long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize logging; RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Handle commands
    match cli.command {
        Some(Commands::Run { remote, latest }) => commands::run::run(config, remote, latest).await,
        Some(Commands::Schedule { seed }) => commands::schedule::run(&config, seed),
        None => commands::run::run(config, None, false).await,
    }
}
