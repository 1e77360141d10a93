//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! runs with its own HOME so configuration never touches the real one.

use std::path::Path;
use std::process::Command;

const NOW: &str = "2025-03-19T10:30:00";

/// Run a CLI command with `home` as HOME and return output.
fn run_cli_in(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "momentum-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("MOMENTUM_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let home = tempfile::tempdir().unwrap();
    run_cli_in(home.path(), args)
}

fn parse_json(out: &str) -> serde_json::Value {
    serde_json::from_str(out).expect("Failed to parse JSON output")
}

#[test]
fn test_dates_json() {
    let (code, stdout, _) = run_cli(&["dates", "Pay rent 3/20", "--now", NOW, "--json"]);
    assert_eq!(code, 0, "dates failed");
    let json = parse_json(&stdout);
    assert_eq!(json[0]["kind"], "numeric");
    assert_eq!(json[0]["date"], "2025-03-20T00:00:00");
    assert_eq!(json[0]["confidence"], 0.95);
}

#[test]
fn test_dates_table() {
    let (code, stdout, _) = run_cli(&["dates", "Next Monday: plan sprint", "--now", NOW]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"Next Monday\""));
    assert!(stdout.contains("2025-03-24 10:30"));
}

#[test]
fn test_dates_no_matches() {
    let (code, stdout, _) = run_cli(&["dates", "nothing here", "--now", NOW]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "no matches");

    let (code, stdout, _) = run_cli(&["dates", "nothing here", "--now", NOW, "--json"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout), serde_json::json!([]));
}

#[test]
fn test_dates_tagger_flag() {
    let (_, stdout, _) = run_cli(&["dates", "friday", "--now", NOW, "--json"]);
    assert_eq!(parse_json(&stdout), serde_json::json!([]));

    let (code, stdout, _) = run_cli(&["dates", "friday", "--now", NOW, "--tagger", "--json"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json[0]["kind"], "nlp_derived");
    assert_eq!(json[0]["date"], "2025-03-21T10:30:00");
}

#[test]
fn test_dates_rejects_bad_reference() {
    let (code, _, stderr) = run_cli(&["dates", "3/20", "--now", "yesterday-ish"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_times_json() {
    let (code, stdout, _) = run_cli(&["times", "2pm", "--now", NOW, "--json"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json[0]["format"], "twelve_hour");
    assert_eq!(json[0]["time"], "2025-03-19T14:00:00");
}

#[test]
fn test_scan_uses_one_reference() {
    let (code, stdout, _) = run_cli(&["scan", "tomorrow at 9am", "--now", NOW, "--json"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["reference"], NOW);
    assert_eq!(json["dates"][0]["kind"], "relative");
    assert_eq!(json["times"][0]["time"], "2025-03-19T09:00:00");
}

#[test]
fn test_gesture_points() {
    let (code, stdout, _) = run_cli(&["gesture", "--points", "0,0 100,0", "--json"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["kind"], "cross_out");

    let (code, stdout, _) = run_cli(&["gesture", "--points", "0,0"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "no matches");

    let (_, stdout, _) = run_cli(&["gesture", "--points", "0,0", "--json"]);
    assert_eq!(stdout.trim(), "null");
}

#[test]
fn test_gesture_file_with_strokes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strokes.json");
    std::fs::write(
        &path,
        r#"[[{"x":0,"y":0},{"x":10,"y":10}],[{"x":20,"y":20},{"x":10,"y":30},{"x":0,"y":40}]]"#,
    )
    .unwrap();

    let (code, stdout, _) =
        run_cli_in(dir.path(), &["gesture", "--file", path.to_str().unwrap(), "--json"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["kind"], "chevron_right");
}

#[test]
fn test_gesture_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strokes.json");
    std::fs::write(&path, r#"{"x": 1}"#).unwrap();

    let (code, _, stderr) = run_cli_in(dir.path(), &["gesture", "--file", path.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("JSON error"));

    let missing = dir.path().join("missing.json");
    let (code, _, stderr) = run_cli_in(dir.path(), &["gesture", "--file", missing.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("IO error"));
}

#[test]
fn test_gesture_requires_input() {
    let (code, _, stderr) = run_cli(&["gesture"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--points"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli_in(home.path(), &["config", "get", "logging.level"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "warn");

    let (code, _, _) = run_cli_in(home.path(), &["config", "set", "output.json", "true"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli_in(home.path(), &["dates", "3/20", "--now", NOW]);
    assert_eq!(code, 0);
    assert!(parse_json(&stdout).is_array());

    let (code, _, stderr) = run_cli_in(home.path(), &["config", "set", "output.json", "maybe"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (code, _, _) = run_cli_in(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli_in(home.path(), &["config", "get", "output.json"]);
    assert_eq!(stdout.trim(), "false");
}

#[test]
fn test_config_clear_optional_value() {
    let home = tempfile::tempdir().unwrap();
    let key = "calendar.utc_offset_minutes";

    let (code, _, _) = run_cli_in(home.path(), &["config", "set", key, "330"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli_in(home.path(), &["config", "get", key]);
    assert_eq!(stdout.trim(), "330");

    let (code, _, stderr) = run_cli_in(home.path(), &["config", "set", key, "none"]);
    assert_eq!(code, 0, "clearing failed: {stderr}");
    let (_, stdout, _) = run_cli_in(home.path(), &["config", "get", key]);
    assert_eq!(stdout.trim(), "null");
}

#[test]
fn test_config_unknown_key() {
    let (code, _, stderr) = run_cli(&["config", "get", "calendar.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_completions() {
    let (code, stdout, _) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("momentum-cli"));
}
