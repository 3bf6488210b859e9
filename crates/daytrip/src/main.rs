//! daytrip - personalized one-day tour itinerary planner.
//!
//! Main entry point for the daytrip CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{facts, history, plan, profile};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// daytrip - personalized one-day tour itinerary planner
#[derive(Parser)]
#[command(name = "daytrip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (default: XDG config dir)
    #[arg(long, global = true, env = "DAYTRIP_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan a one-day itinerary
    Plan(plan::PlanArgs),

    /// Show a user's stored preferences
    Profile(profile::ProfileArgs),

    /// List a user's durable itinerary history
    History(history::HistoryArgs),

    /// Inspect or record relationship facts
    Facts(facts::FactsArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "daytrip=debug,daytrip_agent=debug,daytrip_memory=debug,daytrip_providers=debug,daytrip_llm=debug,info"
    } else {
        "daytrip=info,daytrip_agent=info,daytrip_memory=info,daytrip_providers=info,daytrip_llm=info,warn"
    };

    let log_dir = daytrip_config::config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "daytrip.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "daytrip=trace,daytrip_agent=trace,daytrip_memory=trace,daytrip_providers=trace,daytrip_llm=trace,info",
                )),
        )
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => daytrip_config::Config::load(path)?,
        None => daytrip_config::Config::load_default()?,
    };

    let ctx = commands::Context {
        config,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Plan(args) => plan::run(args, &ctx).await,
        Commands::Profile(args) => profile::run(args, &ctx),
        Commands::History(args) => history::run(args, &ctx),
        Commands::Facts(args) => facts::run(args, &ctx),
    }
}
