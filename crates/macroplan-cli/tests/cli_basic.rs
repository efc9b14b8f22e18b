//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

const PLAN: &str = r#"{
    "profile": {
        "daily_calorie_target": 2000.0,
        "daily_protein_target": 150.0,
        "daily_carb_target": 200.0,
        "daily_fat_target": 65.0,
        "primary_goal": "maintain"
    },
    "windows": [
        {
            "id": "w1",
            "start_time": "2025-06-02T07:00:00Z",
            "end_time": "2025-06-02T09:00:00Z",
            "purpose": "sustained_energy",
            "target_calories": 600.0,
            "target_macros": { "protein_g": 40.0, "carbs_g": 60.0, "fat_g": 20.0 }
        },
        {
            "id": "w2",
            "start_time": "2025-06-02T12:00:00Z",
            "end_time": "2025-06-02T14:00:00Z",
            "purpose": "recovery",
            "target_calories": 700.0,
            "target_macros": { "protein_g": 50.0, "carbs_g": 70.0, "fat_g": 22.0 }
        }
    ],
    "entries": [
        {
            "id": "e1",
            "timestamp": "2025-06-02T08:00:00Z",
            "calories": 600.0,
            "protein_g": 40.0,
            "carbs_g": 60.0,
            "fat_g": 20.0,
            "window_id": "w1"
        }
    ],
    "daily_sync_completed": true
}"#;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "macroplan-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn plan_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(PLAN.as_bytes()).unwrap();
    file
}

#[test]
fn test_plan_show() {
    let file = plan_file();
    let (stdout, _, code) = run_cli(&["plan", "show", file.path().to_str().unwrap()]);
    assert_eq!(code, 0, "plan show failed");
    assert!(stdout.contains("07:00-09:00"));
    assert!(stdout.contains("12:00-14:00"));
}

#[test]
fn test_plan_redistribute() {
    let file = plan_file();
    let (stdout, _, code) = run_cli(&[
        "plan",
        "redistribute",
        file.path().to_str().unwrap(),
        "--at",
        "2025-06-02T10:00:00Z",
    ]);
    assert_eq!(code, 0, "plan redistribute failed");
    // Past window passes through; the upcoming one is listed too.
    assert!(stdout.contains("600 -> 600"));
    assert!(stdout.contains("12:00-14:00"));
}

#[test]
fn test_plan_redistribute_json() {
    let file = plan_file();
    let (stdout, _, code) = run_cli(&[
        "plan",
        "redistribute",
        file.path().to_str().unwrap(),
        "--at",
        "2025-06-02T10:00:00Z",
        "--json",
    ]);
    assert_eq!(code, 0, "plan redistribute --json failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let windows = parsed.as_array().unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0]["adjusted_calories"], 600.0);
}

#[test]
fn test_plan_redistribute_rejects_bad_at() {
    let file = plan_file();
    let (_, stderr, code) = run_cli(&[
        "plan",
        "redistribute",
        file.path().to_str().unwrap(),
        "--at",
        "not-a-time",
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_missing_plan_file_is_an_error() {
    let (_, stderr, code) = run_cli(&["plan", "show", "/nonexistent/plan.json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_completions_generate() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "completions failed");
    assert!(stdout.contains("macroplan-cli"));
}
