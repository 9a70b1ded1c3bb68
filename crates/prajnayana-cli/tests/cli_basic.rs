//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Commands that
//! need the server are only checked for argument handling.

use std::process::Command;

/// Run a CLI command against the dev config directory and return output.
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "prajnayana-cli", "--"])
        .args(args)
        .env("PRAJNAYANA_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_help_lists_commands() {
    let (code, stdout, _) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    for cmd in ["habit", "board", "profile", "discovery", "auth", "config"] {
        assert!(stdout.contains(cmd), "help is missing '{cmd}'");
    }
}

#[test]
fn test_config_get_default_key() {
    let (code, stdout, _) = run_cli(&["config", "get", "api.auth_scheme"]);
    assert_eq!(code, 0, "config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (code, _, stderr) = run_cli(&["config", "get", "api.no_such_key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_set_rejects_bad_value() {
    let (code, _, stderr) = run_cli(&["config", "set", "api.timeout_secs", "soon"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_list_is_json() {
    let (code, stdout, _) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("config list should print JSON");
    assert!(parsed.get("api").is_some());
    assert!(parsed.get("board").is_some());
}

#[test]
fn test_board_rejects_unknown_note_type() {
    let (code, _, stderr) = run_cli(&["board", "list", "--type", "todo"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid value"));
}

#[test]
fn test_habit_toggle_requires_id() {
    let (code, _, stderr) = run_cli(&["habit", "toggle"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_board_help_lists_fit() {
    let (code, stdout, _) = run_cli(&["board", "--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("fit"));
}
