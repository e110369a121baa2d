//! Integration tests for config warning behavior.
//!
//! These tests verify that the CLI warns users when the config file has errors.

use std::fs;
use std::process::Command;

/// An invalid config file produces a warning in stderr and falls back to defaults.
#[test]
fn test_config_warning_on_invalid_toml() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), "invalid toml [[[")
        .expect("Failed to write invalid config");

    // `status` loads config and succeeds without a daemon
    let output = Command::new(env!("CARGO_BIN_EXE_pomo"))
        .env("POMO_HOME", temp_dir.path())
        .arg("status")
        .output()
        .expect("Failed to execute pomo");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(
        stderr.contains("Tip: Check"),
        "Expected tip about config files in stderr, got: {}",
        stderr
    );
    assert!(output.status.success());
}

/// A valid config file does not produce warnings.
#[test]
fn test_no_warning_on_valid_config() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("config.toml"),
        r#"
[timer]
work_minutes = 50

[notifications]
enabled = false
"#,
    )
    .expect("Failed to write valid config");

    let output = Command::new(env!("CARGO_BIN_EXE_pomo"))
        .env("POMO_HOME", temp_dir.path())
        .arg("status")
        .output()
        .expect("Failed to execute pomo");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !stderr.contains("Warning: Could not load config"),
        "Unexpected config warning in stderr: {}",
        stderr
    );
}

/// Zero-length phases on the command line are rejected before the daemon starts.
#[test]
fn test_daemon_rejects_zero_minutes_flag() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_pomo"))
        .env("POMO_HOME", temp_dir.path())
        .args(["daemon", "--work-minutes", "0"])
        .output()
        .expect("Failed to execute pomo");

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("daemon.sock").exists());
}
