//! Default paths for gymtrack components
//!
//! Paths are user-writable by default (no root required):
//! - Config: `$XDG_CONFIG_HOME/gymtrack/config.toml` or `~/.config/gymtrack/config.toml`
//! - Data: `$XDG_DATA_HOME/gymtrack` or `~/.local/share/gymtrack`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const GYMTRACK_DATA_DIR_ENV: &str = "GYMTRACK_DATA_DIR";

/// Application subdirectory name
const APP_DIR: &str = "gymtrack";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Database filename within the data directory
pub const DATABASE_FILENAME: &str = "gymtrack.db";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$XDG_CONFIG_HOME/gymtrack/config.toml`
/// 2. `~/.config/gymtrack/config.toml`
/// 3. `/etc/gymtrack/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$GYMTRACK_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/gymtrack` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/gymtrack` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(GYMTRACK_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// XDG data directory fallback behind `default_data_dir`
fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_ends_with_config_toml() {
        let path = default_config_path();
        assert!(path.ends_with("gymtrack/config.toml"));
    }

    #[test]
    fn data_dir_contains_gymtrack() {
        let path = data_dir_without_env();
        assert!(path.to_string_lossy().contains("gymtrack"));
    }
}
