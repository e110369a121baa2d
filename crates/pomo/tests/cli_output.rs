//! Integration tests for CLI output behavior.
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.
//! Every test points `POMO_HOME` at its own temp dir.

use std::path::Path;
use std::process::{Command, Output};

fn run_pomo(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pomo"))
        .env("POMO_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute pomo")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_status_without_daemon_shows_defaults() {
    let home = tempfile::tempdir().unwrap();
    let output = run_pomo(home.path(), &["status"]);

    assert!(
        output.status.success(),
        "status should succeed without a daemon. stderr: {}",
        stderr_of(&output)
    );
    assert_eq!(
        stdout_of(&output).trim(),
        "25:00  Work Mode  (paused)  Completed Pomodoros: 0"
    );
    assert!(
        stderr_of(&output).contains("Timer daemon is not running"),
        "Expected daemon hint in stderr, got: {}",
        stderr_of(&output)
    );
}

#[test]
fn test_status_json_without_daemon() {
    let home = tempfile::tempdir().unwrap();
    let output = run_pomo(home.path(), &["status", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output))
        .expect("status --json should print valid JSON");
    assert_eq!(value["timeLeft"], 1500);
    assert_eq!(value["isRunning"], false);
    assert_eq!(value["isWorkMode"], true);
    assert_eq!(value["completedPomodoros"], 0);
}

#[test]
fn test_stdout_is_clean_in_verbose_mode() {
    let home = tempfile::tempdir().unwrap();
    let output = run_pomo(home.path(), &["-v", "todo", "list"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        stderr_of(&output).contains(r#""event":"#),
        "verbose mode should log to stderr, got: {}",
        stderr_of(&output)
    );
}

#[test]
fn test_quiet_mode_has_no_info_logs() {
    let home = tempfile::tempdir().unwrap();
    let output = run_pomo(home.path(), &["todo", "list"]);
    assert!(output.status.success());

    let stderr = stderr_of(&output);
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "quiet mode should not emit info logs, got: {}",
        stderr
    );
}

#[test]
fn test_start_without_daemon_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = run_pomo(home.path(), &["start"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Timer daemon is not running"));
}

#[test]
fn test_todo_lifecycle() {
    let home = tempfile::tempdir().unwrap();

    let empty = run_pomo(home.path(), &["todo", "list"]);
    assert!(empty.status.success());
    assert!(stdout_of(&empty).contains("No todos yet"));

    let added = run_pomo(home.path(), &["todo", "add", "write", "report"]);
    assert!(added.status.success(), "stderr: {}", stderr_of(&added));
    assert_eq!(stdout_of(&added).trim(), "Added: write report");
    run_pomo(home.path(), &["todo", "add", "review PR"]);

    let toggled = run_pomo(home.path(), &["todo", "toggle", "1"]);
    assert!(toggled.status.success());
    assert_eq!(stdout_of(&toggled).trim(), "Done: write report");

    let listed = run_pomo(home.path(), &["todo", "list"]);
    let listing = stdout_of(&listed);
    assert!(listing.contains("1. [x] write report"), "got: {}", listing);
    assert!(listing.contains("2. [ ] review PR"), "got: {}", listing);

    let deleted = run_pomo(home.path(), &["todo", "delete", "1"]);
    assert!(deleted.status.success());
    assert_eq!(stdout_of(&deleted).trim(), "Deleted: write report");

    let json = run_pomo(home.path(), &["todo", "list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&json)).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"position": 1, "text": "review PR", "completed": false}])
    );

    let persisted = std::fs::read_to_string(home.path().join("data/todos.json")).unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&persisted).unwrap();
    assert_eq!(
        persisted,
        serde_json::json!([{"text": "review PR", "completed": false}])
    );
}

#[test]
fn test_todo_toggle_out_of_range_fails() {
    let home = tempfile::tempdir().unwrap();
    run_pomo(home.path(), &["todo", "add", "only item"]);

    let output = run_pomo(home.path(), &["todo", "toggle", "3"]);
    assert!(!output.status.success());
    assert!(
        stderr_of(&output).contains("No todo at position 3"),
        "got: {}",
        stderr_of(&output)
    );
}

#[test]
fn test_corrupt_todo_list_is_kept() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    let original = r#"[{"text":"a","completed":false},]"#;
    std::fs::write(data_dir.join("todos.json"), original).unwrap();

    let listed = run_pomo(home.path(), &["todo", "list"]);
    assert!(listed.status.success());
    assert!(
        stderr_of(&listed).contains("Warning: Could not read the todo list"),
        "got: {}",
        stderr_of(&listed)
    );

    let added = run_pomo(home.path(), &["todo", "add", "new item"]);
    assert!(!added.status.success());
    assert!(stderr_of(&added).contains("refusing to overwrite"));
    assert_eq!(
        std::fs::read_to_string(data_dir.join("todos.json")).unwrap(),
        original
    );
}

#[test]
fn test_todo_add_blank_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = run_pomo(home.path(), &["todo", "add", "   "]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Todo text cannot be empty"));
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    let output = run_pomo(home.path(), &["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("pomo"));
}
