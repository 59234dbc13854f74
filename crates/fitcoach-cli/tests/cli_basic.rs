//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temporary directory,
//! so config and preferences never touch the real user's files.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn cli(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fitcoach"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env("FITCOACH_ENV", "dev")
        .env_remove("FITCOACH_LOG");
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = cli(home)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_notes_tabata() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["notes", "tabata", "30s work / 15s rest x 6"]);
    assert_eq!(code, 0, "notes failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["format"], "tabata");
    assert_eq!(json["work_seconds"], 30);
    assert_eq!(json["rest_seconds"], 15);
    assert_eq!(json["sets"], 6);
}

#[test]
fn test_notes_emom_rotation() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["notes", "emom", "every 2 min for 16 minutes"]);
    assert_eq!(code, 0, "notes failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["minutes"], 16);
    assert_eq!(json["rotate_every"], 2);
}

#[test]
fn test_notes_rejects_unknown_format() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["notes", "circuit", "3 rounds"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timer.preparation_seconds"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "5");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.preparation_seconds", "0"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "timer.preparation_seconds"]);
    assert_eq!(stdout.trim(), "0");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.nope", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_prefs_audio_and_fullscreen() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_cli(home.path(), &["prefs", "audio", "off"]).2, 0);
    assert_eq!(run_cli(home.path(), &["prefs", "fullscreen", "emom", "on"]).2, 0);

    let (stdout, _, code) = run_cli(home.path(), &["prefs", "show"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["audio_enabled"], false);
    assert_eq!(json["fullscreen"]["EMOM"], true);
    assert_eq!(json["fullscreen"]["Tabata"], false);
}

#[test]
fn test_run_requires_a_source() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["run", "--format", "amrap"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--file"));
}

#[test]
fn test_run_for_time_block_from_file() {
    let home = tempfile::tempdir().unwrap();
    let block = home.path().join("block.json");
    std::fs::write(
        &block,
        r#"{"blockType": "For Time", "exercises": [{"exercise": {"name": "Row 500m"}, "order": 1}]}"#,
    )
    .unwrap();

    let mut child = cli(home.path())
        .args(["run", "--format", "for-time", "--prep", "0", "--file"])
        .arg(&block)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    // Keep stdin open: the session must end on completion, not on EOF.
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"start\ndone 0\n").unwrap();
    stdin.flush().unwrap();
    let output = child.wait_with_output().unwrap();
    drop(stdin);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let types: Vec<String> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter_map(|v| v["type"].as_str().map(str::to_string))
        .collect();
    assert_eq!(types.first().map(String::as_str), Some("SessionStarted"));
    assert!(types.iter().any(|t| t == "StepCompleted"));
    assert_eq!(types.last().map(String::as_str), Some("SessionCompleted"));
}
