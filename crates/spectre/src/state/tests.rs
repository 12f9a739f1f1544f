use super::{load_state, save_state, PersistedState};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::test_utils::{env_lock, EnvVarGuard};

fn with_state_path<T>(path: &Path, action: impl FnOnce() -> T) -> T {
    let _guard = env_lock();
    let _path = EnvVarGuard::set("SPECTRE_STATE_PATH", path.to_string_lossy().to_string());
    action()
}

#[test]
fn missing_state_falls_back_to_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let state_path = dir.path().join("state.toml");

    with_state_path(&state_path, || {
        let state = load_state(dir.path(), 7);
        assert_eq!(state.theme, 0);
        assert_eq!(state.path, dir.path());
    });
}

#[test]
fn state_round_trips_through_disk() {
    let dir = TempDir::new().expect("temp dir");
    let state_path = dir.path().join("nested").join("state.toml");
    let browse = dir.path().join("loot");
    fs::create_dir_all(&browse).expect("create browse dir");

    with_state_path(&state_path, || {
        save_state(&PersistedState {
            theme: 4,
            path: browse.clone(),
        })
        .expect("save state");
        let state = load_state(dir.path(), 7);
        assert_eq!(state.theme, 4);
        assert_eq!(state.path, browse);
    });
}

#[test]
fn stale_values_are_replaced() {
    let dir = TempDir::new().expect("temp dir");
    let state_path = dir.path().join("state.toml");
    fs::write(
        &state_path,
        "theme = 42\npath = \"/definitely/not/a/real/dir\"\n",
    )
    .expect("write state");

    with_state_path(&state_path, || {
        let state = load_state(dir.path(), 7);
        assert_eq!(state.theme, 0);
        assert_eq!(state.path, dir.path());
    });
}

#[test]
fn garbage_state_is_ignored() {
    let dir = TempDir::new().expect("temp dir");
    let state_path = dir.path().join("state.toml");
    fs::write(&state_path, "theme = = 1").expect("write state");

    with_state_path(&state_path, || {
        assert_eq!(load_state(dir.path(), 7).theme, 0);
    });
}
