//! History command - list a user's durable itinerary history.

use anyhow::Result;
use clap::Args;
use console::Style;

use daytrip_memory::FactStore;

use super::Context;

/// Arguments for the history command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// User identifier
    #[arg(short, long)]
    pub user: String,

    /// Show only the most recent N entries
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Run the history command.
pub fn run(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();
    let store = FactStore::open(ctx.config.store.effective_db_path())?;

    let entries = store.fetch_history(&args.user)?;
    if entries.is_empty() {
        println!("{}", dim.apply_to(format!("No history for {}", args.user)));
        return Ok(());
    }

    let skip = match args.limit {
        Some(limit) => entries.len().saturating_sub(limit),
        None => 0,
    };

    for (i, entry) in entries.iter().enumerate().skip(skip) {
        println!("{}", dim.apply_to(format!("--- itinerary {} ---", i + 1)));
        println!("{}", entry.trim());
        println!();
    }

    Ok(())
}
