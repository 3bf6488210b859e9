//! Facts command - inspect or record relationship facts.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use daytrip_memory::FactStore;

use super::Context;

/// Arguments for the facts command.
#[derive(Args, Debug)]
pub struct FactsArgs {
    #[command(subcommand)]
    pub command: FactsCommand,
}

#[derive(Subcommand, Debug)]
pub enum FactsCommand {
    /// List a user's relationship facts
    List {
        /// User identifier
        #[arg(short, long)]
        user: String,
    },

    /// Record a relationship fact (e.g., VISITED "Louvre")
    Add {
        /// User identifier
        #[arg(short, long)]
        user: String,

        /// Relationship type (e.g., VISITED, LIKES)
        relationship: String,

        /// Entity name (e.g., "Louvre")
        entity: String,
    },

    /// Show store-wide counts
    Stats,
}

/// Run the facts command.
pub fn run(args: FactsArgs, ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();
    let store = FactStore::open(ctx.config.store.effective_db_path())?;

    match args.command {
        FactsCommand::List { user } => {
            let facts = store.fetch_relationships(&user)?;
            if facts.is_empty() {
                println!("{}", dim.apply_to(format!("No facts for {}", user)));
            } else {
                for fact in facts {
                    println!("{}: {}", fact.relationship, fact.entity);
                }
            }
        }
        FactsCommand::Add {
            user,
            relationship,
            entity,
        } => {
            store.add_relationship(&user, &relationship, &entity)?;
            println!("Recorded {} {} {}", user, relationship, entity);
        }
        FactsCommand::Stats => {
            let stats = store.stats()?;
            println!("Users:    {}", stats.user_count);
            println!("Entities: {}", stats.entity_count);
            println!("Facts:    {}", stats.fact_count);
            println!("History:  {}", stats.history_count);
            println!(
                "{}",
                dim.apply_to(format!("Schema version: {}", stats.schema_version))
            );
        }
    }

    Ok(())
}
