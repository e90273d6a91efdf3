//! Config path management.
//!
//! Determines the settings file location across platforms, with support for
//! a CLI override and an environment variable.

use std::path::PathBuf;
use std::sync::OnceLock;

use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};

/// Override for the settings path, set via the --config CLI flag
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Environment variable naming an explicit settings file (also used by tests)
pub const CONFIG_PATH_ENV: &str = "STATUSLINE_CONFIG_PATH";

/// Set the settings path override (called from CLI --config flag)
pub fn set_config_path(path: PathBuf) {
    CONFIG_PATH.set(path).ok();
}

/// Get the settings file path.
///
/// Priority:
/// 1. CLI --config flag (set via `set_config_path`)
/// 2. STATUSLINE_CONFIG_PATH environment variable
/// 3. Platform-specific default location
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = CONFIG_PATH.get() {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    // choose_base_strategy uses:
    // - XDG on Linux (respects XDG_CONFIG_HOME, falls back to ~/.config)
    // - XDG on macOS (~/.config instead of ~/Library/Application Support)
    // - Windows conventions on Windows (%APPDATA%)
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("statusline").join("config.toml"))
}
