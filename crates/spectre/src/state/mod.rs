//! Persistent dashboard state.
//!
//! Stores state that persists across sessions in
//! `$SPECTRE_STATE_PATH`, or `state.toml` next to the config file.
//!
//! Tracks the selected theme and the browser directory so the next
//! launch reopens where the last one left off.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::config_dir;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    pub theme: usize,
    pub path: PathBuf,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawState {
    theme: Option<usize>,
    #[serde(alias = "last_path")]
    path: Option<String>,
}

pub fn state_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SPECTRE_STATE_PATH").filter(|path| !path.is_empty()) {
        return Some(PathBuf::from(path));
    }
    Some(config_dir()?.join("state.toml"))
}

/// Saved state, or theme 0 in `fallback_dir`. A saved path that no longer
/// names a directory is replaced by the fallback.
pub fn load_state(fallback_dir: &Path, theme_count: usize) -> PersistedState {
    let raw = state_path()
        .and_then(|path| fs::read_to_string(path).ok())
        .and_then(|contents| match toml::from_str::<RawState>(&contents) {
            Ok(raw) => Some(raw),
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable state file");
                None
            }
        })
        .unwrap_or_default();

    let theme = raw
        .theme
        .filter(|theme| *theme < theme_count.max(1))
        .unwrap_or(0);
    let path = raw
        .path
        .map(PathBuf::from)
        .filter(|path| path.is_dir())
        .unwrap_or_else(|| fallback_dir.to_path_buf());

    PersistedState { theme, path }
}

pub fn save_state(state: &PersistedState) -> std::io::Result<()> {
    let path = match state_path() {
        Some(path) => path,
        None => return Ok(()),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = RawState {
        theme: Some(state.theme),
        path: Some(state.path.to_string_lossy().to_string()),
    };
    let contents = toml::to_string(&raw).map_err(std::io::Error::other)?;
    fs::write(path, contents)
}
