//! Command implementations for the daytrip CLI.

pub mod facts;
pub mod history;
pub mod plan;
pub mod profile;

use daytrip_config::Config;

/// Shared context passed to all commands.
pub struct Context {
    /// Loaded configuration.
    pub config: Config,

    /// Whether verbose output is enabled.
    pub verbose: bool,
}
