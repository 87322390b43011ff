//! Path utilities for determining data storage locations.
//!
//! All state lives under one data directory: `$DESKMATE_HOME` when set,
//! otherwise `~/.deskmate/`.

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const HOME_ENV_VAR: &str = "DESKMATE_HOME";

/// The base directory name under the user's home.
const DATA_DIR_NAME: &str = ".deskmate";

/// The database filename.
pub const DATABASE_FILENAME: &str = "storage.sqlite3";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// The log directory name.
pub const LOG_DIR_NAME: &str = "logs";

/// Get the base data directory.
///
/// Returns `None` if neither the override variable is set nor the home
/// directory can be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    match std::env::var_os(HOME_ENV_VAR) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir().map(|home| home.join(DATA_DIR_NAME)),
    }
}

/// Get the key-value database path.
#[must_use]
pub fn database_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DATABASE_FILENAME))
}

/// Get the config file path.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Get the directory rolling log files are written to.
#[must_use]
pub fn log_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(LOG_DIR_NAME))
}
