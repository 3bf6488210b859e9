//! Profile command - show a user's stored preferences.

use anyhow::Result;
use clap::Args;
use console::Style;

use daytrip_memory::FactStore;

use super::Context;

/// Arguments for the profile command.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// User identifier
    #[arg(short, long)]
    pub user: String,
}

/// Run the profile command.
pub fn run(args: ProfileArgs, ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();
    let store = FactStore::open(ctx.config.store.effective_db_path())?;

    match store.fetch_profile(&args.user)? {
        Some(profile) => {
            let p = &profile.preferences;
            println!("Preferences for {}:", profile.user_id);
            println!("  City:           {}", p.city);
            println!("  Date:           {}", p.date);
            println!("  Timing:         {}", p.timing);
            println!("  Interests:      {}", p.interests);
            println!("  Budget:         ₹{}", p.budget);
            println!("  Start location: {}", p.start_location);
            println!(
                "{}",
                dim.apply_to(format!("  Last updated:   {}", profile.last_updated))
            );
        }
        None => {
            println!("{}", dim.apply_to(format!("No profile for {}", args.user)));
        }
    }

    Ok(())
}
