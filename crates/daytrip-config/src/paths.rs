//! Default filesystem locations for daytrip state.

use std::path::PathBuf;

/// The daytrip config directory (`~/.config/daytrip` on Linux).
///
/// Can be overridden with the `DAYTRIP_CONFIG_DIR` environment variable.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("DAYTRIP_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|dir| dir.join("daytrip"))
}

/// Default location of the config file.
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Default location of the fact-store database.
pub fn default_db_path() -> PathBuf {
    config_dir()
        .map(|dir| dir.join("facts.db"))
        .unwrap_or_else(|| PathBuf::from("facts.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path_has_filename() {
        assert_eq!(
            default_db_path().file_name().unwrap().to_str(),
            Some("facts.db")
        );
    }
}
