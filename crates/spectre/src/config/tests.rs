use super::{config_path, load_config, DEFAULT_INTERACTIVE};
use crate::test_utils::{env_lock, EnvVarGuard};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create config dir");
    }
    fs::write(path, contents).expect("write config");
}

#[test]
fn load_config_uses_defaults_when_missing() {
    let _guard = env_lock();
    let dir = TempDir::new().expect("temp dir");
    let _path = EnvVarGuard::set(
        "SPECTRE_CONFIG_PATH",
        dir.path().join("missing.toml").to_string_lossy().to_string(),
    );

    let config = load_config();

    assert_eq!(config.keymap.quit, "ctrl+q");
    assert_eq!(config.keymap.cycle_theme, "ctrl+t");
    assert_eq!(config.shell.program, "/bin/sh");
    assert_eq!(config.shell.timeout, Duration::from_secs(10));
    assert_eq!(config.shell.interactive.len(), DEFAULT_INTERACTIVE.len());
    assert!(config.shell.is_interactive("vim"));
    assert!(config.shell.is_interactive("ssh"));
    assert!(!config.shell.is_interactive("ls"));
    assert_eq!(config.probes.fast, Duration::ZERO);
    assert_eq!(config.probes.monitor, Duration::from_secs(2));
    assert_eq!(config.probes.network, Duration::from_secs(5));
    assert_eq!(config.thresholds.cpu, 80);
    assert_eq!(config.thresholds.memory, 85);
}

#[test]
fn load_config_applies_overrides() {
    let _guard = env_lock();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("spectre").join("config.toml");
    let _path = EnvVarGuard::set("SPECTRE_CONFIG_PATH", path.to_string_lossy().to_string());
    write_config(
        &path,
        r#"
[keymap]
quit = "ctrl+x"

[shell]
program = "/bin/bash"
timeout_secs = 3
interactive = ["hx", "vim", "  "]

[probes]
monitorSecs = 7

[thresholds]
cpu = 150
memory = 50
"#,
    );

    let config = load_config();

    assert_eq!(config.keymap.quit, "ctrl+x");
    assert_eq!(config.keymap.cycle_theme, "ctrl+t");
    assert_eq!(config.shell.program, "/bin/bash");
    assert_eq!(config.shell.timeout, Duration::from_secs(3));
    assert!(config.shell.is_interactive("hx"));
    // Duplicates and blanks are ignored.
    assert_eq!(config.shell.interactive.len(), DEFAULT_INTERACTIVE.len() + 1);
    assert_eq!(config.probes.monitor, Duration::from_secs(7));
    assert_eq!(config.probes.network, Duration::from_secs(5));
    assert_eq!(config.thresholds.cpu, 100);
    assert_eq!(config.thresholds.memory, 50);
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let _guard = env_lock();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.toml");
    let _path = EnvVarGuard::set("SPECTRE_CONFIG_PATH", path.to_string_lossy().to_string());
    write_config(&path, "[shell\nprogram = ");

    let config = load_config();

    assert_eq!(config.shell.program, "/bin/sh");
    assert_eq!(config.keymap.quit, "ctrl+q");
}

#[test]
fn zero_timeout_keeps_default() {
    let _guard = env_lock();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.toml");
    let _path = EnvVarGuard::set("SPECTRE_CONFIG_PATH", path.to_string_lossy().to_string());
    write_config(&path, "[shell]\ntimeout_secs = 0\nprogram = \"\"\n");

    let config = load_config();

    assert_eq!(config.shell.timeout, Duration::from_secs(10));
    assert_eq!(config.shell.program, "/bin/sh");
}

#[test]
fn config_path_follows_xdg_config_home() {
    let _guard = env_lock();
    let dir = TempDir::new().expect("temp dir");
    let _override = EnvVarGuard::set("SPECTRE_CONFIG_PATH", String::new());
    let _xdg = EnvVarGuard::set("XDG_CONFIG_HOME", dir.path().to_string_lossy().to_string());

    assert_eq!(
        config_path(),
        Some(dir.path().join("spectre").join("config.toml"))
    );
}
