//! Integration tests for the forge_cli binary.
//!
//! These tests verify end-to-end behavior including:
//! - Formula subcommands (score, reverse, strength, hypertrophy, drop-rep)
//! - Reference table output
//! - Recommendations from config, history and context snapshots

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("forge"))
}

/// Write a config file and return its path
fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).expect("Failed to write config");
    path
}

const HISTORY_JSONL: &str = r#"{"performed_at": "2024-03-14T10:00:00Z", "exercises": [{"name": "Bench Press", "sets": [{"reps": 8, "weight": 185, "rpe": 8}, {"reps": 8, "weight": 185, "rpe": 8.5}]}]}
{"performed_at": "2024-03-12T10:00:00Z", "exercises": [{"name": "Squat", "sets": [{"reps": 5, "weight": 275, "rpe": 8}, {"reps": 5, "weight": 275, "rpe": 8}, {"reps": 5, "weight": 275}]}]}
"#;

const CONTEXT_JSON: &str = r#"{"now": "2024-03-15T08:00:00Z", "phase": "accumulation", "readiness": 9}"#;

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Strength training volume and fatigue optimizer",
        ));
}

#[test]
fn test_score_reference_entry() {
    cli()
        .args(["score", "--reps", "10", "--intensity", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Per set: 250.0"))
        .stdout(predicate::str::contains("Zone: light"));
}

#[test]
fn test_score_multiple_sets_changes_zone() {
    cli()
        .args(["score", "--reps", "10", "--intensity", "80", "--sets", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total (3 sets): 750.0"))
        .stdout(predicate::str::contains("Zone: extreme"));
}

#[test]
fn test_score_rejects_full_intensity() {
    cli()
        .args(["score", "--reps", "5", "--intensity", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidIntensity"));
}

#[test]
fn test_score_clamps_intensity_on_request() {
    cli()
        .args(["score", "--reps", "5", "--intensity", "120", "--clamp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Per set: 50000.0"))
        .stdout(predicate::str::contains("Zone: extreme"));
}

#[test]
fn test_reverse_prescription() {
    cli()
        .args(["reverse", "--intensity", "80", "--zone", "moderate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("18 total reps (range 16-19)"));
}

#[test]
fn test_reverse_unknown_zone_fails() {
    cli()
        .args(["reverse", "--intensity", "80", "--zone", "volcanic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown fatigue zone"));
}

#[test]
fn test_drop_rep_calibration() {
    cli()
        .args(["drop-rep", "--intensity", "75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Drop rep 5 of ~10"));
}

#[test]
fn test_strength_division() {
    cli()
        .args(["strength", "--total-reps", "23", "--intensity", "75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 sets x 5 reps"))
        .stdout(predicate::str::contains("Quality reps: 25 of 23 requested (+2)"))
        .stdout(predicate::str::contains("Session fatigue: 400.0 (moderate)"));
}

#[test]
fn test_strength_non_positive_total() {
    cli()
        .args(["strength", "--total-reps", "-4", "--intensity", "75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No working sets"));
}

#[test]
fn test_hypertrophy_options() {
    cli()
        .args(["hypertrophy", "--total-reps", "40", "--intensity", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("sets x"));
}

#[test]
fn test_table_csv() {
    cli()
        .args(["table", "--reps", "10", "--intensities", "70,80"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("reps,intensity_percent,score,zone"))
        .stdout(predicate::str::contains("10,80.0,250.0,light"));
}

#[test]
fn test_table_rejects_bad_range() {
    cli()
        .args(["table", "--reps", "12-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rep range"));
}

#[test]
fn test_table_rejects_oversized_range() {
    cli()
        .args(["table", "--reps", "0-4000000000", "--intensities", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidReps"));
}

#[test]
fn test_tonnage() {
    cli()
        .args(["tonnage", "--sets", "8", "--reps", "10", "--weight", "285"])
        .assert()
        .success()
        .stdout(predicate::str::contains("22800"));
}

#[test]
fn test_recommend_disabled() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "[optimizer]\nenabled = false\n");

    cli()
        .arg("recommend")
        .arg("--config")
        .arg(&config)
        .arg("--history")
        .arg(temp_dir.path().join("missing.jsonl"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Optimizer disabled"));
}

#[test]
fn test_recommend_json_from_snapshots() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "[optimizer]\nmax_sets_per_session = 18\n");
    let history = temp_dir.path().join("history.jsonl");
    let context = temp_dir.path().join("context.json");
    fs::write(&history, HISTORY_JSONL).unwrap();
    fs::write(&context, CONTEXT_JSON).unwrap();

    let output = cli()
        .arg("recommend")
        .arg("--config")
        .arg(&config)
        .arg("--history")
        .arg(&history)
        .arg("--context")
        .arg(&context)
        .arg("--json")
        .output()
        .expect("Failed to run forge");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["status"], "recommended");
    assert_eq!(json["session_volume"], 18);
    assert_eq!(json["weekly_volume_status"]["chest"]["current"], 2.0);
    assert_eq!(json["weekly_volume_status"]["quads"]["status"], "under");
    assert!(json["rationale"]
        .as_str()
        .unwrap()
        .starts_with("Accumulation phase"));
}

#[test]
fn test_recommend_text_output() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");
    let history = temp_dir.path().join("history.jsonl");
    fs::write(&history, HISTORY_JSONL).unwrap();

    cli()
        .arg("recommend")
        .arg("--config")
        .arg(&config)
        .arg("--history")
        .arg(&history)
        .arg("--context")
        .arg(temp_dir.path().join("no-context.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("NEXT SESSION"))
        .stdout(predicate::str::contains("Weekly volume:"));
}

#[test]
fn test_recommend_same_inputs_same_output() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");
    let history = temp_dir.path().join("history.jsonl");
    let context = temp_dir.path().join("context.json");
    fs::write(&history, HISTORY_JSONL).unwrap();
    fs::write(&context, CONTEXT_JSON).unwrap();

    let run = || {
        cli()
            .arg("recommend")
            .arg("--config")
            .arg(&config)
            .arg("--history")
            .arg(&history)
            .arg("--context")
            .arg(&context)
            .arg("--json")
            .output()
            .expect("Failed to run forge")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_recommend_invalid_config_fails() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "[optimizer]\nmax_sets_per_session = -1\n");

    cli()
        .arg("recommend")
        .arg("--config")
        .arg(&config)
        .arg("--history")
        .arg(temp_dir.path().join("missing.jsonl"))
        .arg("--context")
        .arg(temp_dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_sets_per_session must not be negative"));
}
