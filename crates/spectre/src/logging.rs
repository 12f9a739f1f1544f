//! Tracing subscriber setup.
//!
//! The screen belongs to the dashboard, so logs only ever go to a file:
//! `$SPECTRE_LOG_PATH`, or `~/.local/state/spectre/spectre.log`.
//! `RUST_LOG` filters as usual; the default level is `info`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub fn log_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SPECTRE_LOG_PATH").filter(|path| !path.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let home = dirs::home_dir()?;
    Some(
        home.join(".local")
            .join("state")
            .join("spectre")
            .join("spectre.log"),
    )
}

/// Install the global subscriber. Logging is skipped entirely when the
/// log file cannot be created.
pub fn init() {
    let Some(path) = log_path() else {
        return;
    };
    let Some(file) = open_log(&path) else {
        return;
    };
    // Fails only when a subscriber is already installed.
    let _ = build_subscriber(file).try_init();
    tracing::info!(path = %path.display(), "logging started");
}

fn open_log(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    File::create(path).ok()
}

pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

#[cfg(test)]
mod tests {
    use super::{build_subscriber, log_path};
    use crate::test_utils::{env_lock, EnvVarGuard};
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn subscriber_writes_to_file() {
        let log_file = NamedTempFile::new().expect("temp log");
        let subscriber = build_subscriber(log_file.reopen().expect("reopen"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("handoff failed");
        });

        let contents = std::fs::read_to_string(log_file.path()).expect("read log");
        assert!(contents.contains("WARN"));
        assert!(contents.contains("handoff failed"));
    }

    #[test]
    fn log_path_honors_override() {
        let _guard = env_lock();
        let _path = EnvVarGuard::set("SPECTRE_LOG_PATH", "/tmp/spectre-test.log".to_string());
        assert_eq!(log_path(), Some(PathBuf::from("/tmp/spectre-test.log")));
    }
}
