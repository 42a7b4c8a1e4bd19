//! Per-user data directory resolution.
//!
//! - Windows: `%APPDATA%\<app>` (fallback `~/AppData/Roaming/<app>`)
//! - Elsewhere: `$XDG_DATA_HOME/<app>` if set, else `~/.local/share/<app>`

use std::path::{Path, PathBuf};

use crate::error::ToolError;

/// Application directory name under the platform data root.
pub const APP_NAME: &str = "devkit";

/// Data directory for `app_name`. Does not create it.
pub fn user_data_dir(app_name: &str) -> PathBuf {
    data_root().join(app_name)
}

#[cfg(windows)]
fn data_root() -> PathBuf {
    match std::env::var_os("APPDATA") {
        Some(appdata) if !appdata.is_empty() => PathBuf::from(appdata),
        _ => home_dir().join("AppData").join("Roaming"),
    }
}

#[cfg(not(windows))]
fn data_root() -> PathBuf {
    match std::env::var_os("XDG_DATA_HOME") {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => home_dir().join(".local").join("share"),
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), ToolError> {
    std::fs::create_dir_all(dir).map_err(|e| ToolError::io(dir, e))
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
