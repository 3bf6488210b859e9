//! Configuration system for the daytrip planner.
//!
//! A single TOML file under the XDG config dir drives the fact store,
//! both context providers, the generation backend, and prompt assembly.
//! Every section has defaults; API keys may live in the environment
//! instead of the file.

pub mod error;
pub mod paths;
pub mod types;

pub use error::{ConfigError, Result};
pub use paths::{config_dir, default_config_path, default_db_path};
pub use types::{Config, GenerationConfig, PromptConfig, ProviderConfig, StoreConfig};
