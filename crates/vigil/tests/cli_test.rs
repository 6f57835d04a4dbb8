//! Integration tests for the `vigil` CLI binary.
//!
//! Every run seeds a fresh in-memory service, so these tests pin the
//! seed, disable latency, and point config directories away from the
//! user's real configuration.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `vigil` binary with env isolation.
fn vigil_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vigil");
    cmd.env("HOME", "/tmp/vigil-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/vigil-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("VIGIL_SEED")
        .env_remove("VIGIL_OUTPUT")
        .env_remove("VIGIL_NO_LATENCY")
        .env_remove("RUST_LOG");
    cmd
}

/// A seeded, latency-free invocation.
fn seeded() -> assert_cmd::Command {
    let mut cmd = vigil_cmd();
    cmd.args(["--seed", "7", "--no-latency"]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = vigil_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    vigil_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("cameras")
            .and(predicate::str::contains("alerts"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn test_version_flag() {
    vigil_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vigil"));
}

#[test]
fn test_completions_zsh() {
    vigil_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Cameras ─────────────────────────────────────────────────────────

#[test]
fn test_cameras_list_pages_json() {
    let output = seeded()
        .args(["cameras", "list", "--page-size", "5", "--page", "2", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cameras = stdout_json(&output);
    let ids: Vec<&str> = cameras
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["cam-6", "cam-7", "cam-8", "cam-9", "cam-10"]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Showing 6-10 of 66"));
}

#[test]
fn test_cameras_list_table_has_headers() {
    seeded()
        .args(["cameras", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Location").and(predicate::str::contains("cam-1")))
        .stderr(predicate::str::contains("Showing 1-10 of 66"));
}

#[test]
fn test_cameras_list_search_narrows() {
    seeded()
        .args(["cameras", "list", "--search", "camera 00", "-o", "plain"])
        .assert()
        .success()
        .stderr(predicate::str::contains("of 9"));
}

#[test]
fn test_cameras_list_page_past_end_is_usage_error() {
    seeded()
        .args(["cameras", "list", "--page", "99"])
        .assert()
        .code(2);
}

#[test]
fn test_small_camera_count_from_env() {
    seeded()
        .env("VIGIL_SERVICE__CAMERA_COUNT", "2")
        .args(["cameras", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("cam-1\ncam-2\n")
        .stderr(predicate::str::contains("Showing 1-2 of 2"));
}

#[test]
fn test_camera_get_plain() {
    seeded()
        .args(["cameras", "get", "cam-3", "-o", "plain"])
        .assert()
        .success()
        .stdout("cam-3\n");
}

#[test]
fn test_camera_get_unknown_is_not_found() {
    let output = seeded().args(["cameras", "get", "cam-999"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("cam-999"));
}

#[test]
fn test_camera_update_applies_fields() {
    let output = seeded()
        .args([
            "cameras", "update", "cam-4", "--name", "Dock Door", "--recording", "false", "-o",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let camera = stdout_json(&output);
    assert_eq!(camera["name"], "Dock Door");
    assert_eq!(camera["recording"], false);
    assert_eq!(camera["id"], "cam-4");
}

#[test]
fn test_camera_update_rejects_empty_name() {
    seeded()
        .args(["cameras", "update", "cam-4", "--name", ""])
        .assert()
        .code(2);
}

#[test]
fn test_camera_delete_requires_yes_without_tty() {
    seeded()
        .args(["cameras", "delete", "cam-2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_camera_delete_with_yes() {
    seeded()
        .args(["-y", "cameras", "delete", "cam-2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("65 camera(s) remain"));
}

#[test]
fn test_huge_latency_scale_fails_cleanly() {
    let output = seeded()
        .env("VIGIL_SERVICE__LATENCY_SCALE", "1e20")
        .args(["cameras", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("latency_scale"));
}

// ── Locations & dashboard ───────────────────────────────────────────

#[test]
fn test_locations_plain() {
    let output = seeded().args(["locations", "-o", "plain"]).output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert_eq!(text.lines().count(), 8);
    assert!(text.lines().any(|l| l == "Server Room"));
}

#[test]
fn test_dashboard_json_counts_cameras() {
    let output = seeded().args(["dashboard", "-o", "json"]).output().unwrap();
    assert!(output.status.success());

    let data = stdout_json(&output);
    let summary = &data["cameraSummary"];
    assert_eq!(summary["total"], 66);
    let parts = ["online", "offline", "warning"]
        .iter()
        .map(|k| summary[*k].as_u64().unwrap())
        .sum::<u64>();
    assert_eq!(parts, 66);
    assert!(data["alerts"].as_array().unwrap().len() <= 6);
}

// ── Alerts ──────────────────────────────────────────────────────────

#[test]
fn test_alerts_list_unread_first() {
    let output = seeded()
        .args(["alerts", "list", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let alerts = stdout_json(&output);
    let statuses: Vec<&str> = alerts
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses.len(), 150);
    let first_read = statuses.iter().position(|s| *s != "Unread").unwrap_or(150);
    assert!(statuses[first_read..].iter().all(|s| *s != "Unread"));
}

#[test]
fn test_alerts_list_limit_and_severity() {
    let output = seeded()
        .args(["alerts", "list", "--severity", "critical", "--limit", "3", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let alerts = stdout_json(&output);
    let alerts = alerts.as_array().unwrap();
    assert!(alerts.len() <= 3);
    assert!(alerts.iter().all(|a| a["severity"] == "Critical"));
}

#[test]
fn test_alerts_list_deleted_starts_empty() {
    seeded()
        .args(["alerts", "list", "--status", "deleted", "-o", "json-compact"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn test_alerts_list_status_read_is_unfiltered() {
    let output = seeded()
        .args(["alerts", "list", "--status", "read", "-o", "plain"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 150);
}

#[test]
fn test_alerts_list_bad_since_is_usage_error() {
    seeded()
        .args(["alerts", "list", "--since", "yesterday"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("since"));
}

#[test]
fn test_alerts_unread_probability_from_env() {
    let output = seeded()
        .env("VIGIL_SERVICE__UNREAD_PROBABILITY", "1.0")
        .args(["alerts", "list", "--status", "unread", "-o", "plain"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 150);
}

#[test]
fn test_alert_ack_marks_read() {
    let output = seeded()
        .env("VIGIL_SERVICE__UNREAD_PROBABILITY", "1.0")
        .args(["alerts", "ack", "1001", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "Read");
}

#[test]
fn test_alert_resolve() {
    let output = seeded()
        .args(["alerts", "resolve", "1010", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "Resolved");
}

#[test]
fn test_alert_ack_all_reports_count() {
    seeded()
        .env("VIGIL_SERVICE__UNREAD_PROBABILITY", "1.0")
        .args(["alerts", "ack-all"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Acknowledged 150 alert(s)"));
}

#[test]
fn test_alert_unknown_is_not_found() {
    seeded()
        .args(["alerts", "delete", "42"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("alert '42' not found"));
}

#[test]
fn test_unavailable_source_exit_code() {
    seeded()
        .env("VIGIL_SERVICE__FAILURE_RATE", "1.0")
        .args(["alerts", "list"])
        .assert()
        .code(7);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_points_into_config_home() {
    vigil_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_reflects_env() {
    let output = vigil_cmd()
        .env("VIGIL_SERVICE__SEED", "42")
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cfg = stdout_json(&output);
    assert_eq!(cfg["service"]["seed"], 42);
    assert_eq!(cfg["defaults"]["page_size"], 10);
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().to_str().unwrap();

    let init = || {
        let mut cmd = vigil_cmd();
        cmd.env("HOME", home).env("XDG_CONFIG_HOME", home);
        cmd.args(["config", "init"]);
        cmd
    };

    init().assert().success();
    init().assert().code(2).stderr(predicate::str::contains("already exists"));
    init().arg("--yes").assert().success();
}
