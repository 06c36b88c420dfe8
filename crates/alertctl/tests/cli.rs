//! Binary tests: argument handling, exit codes and end-to-end output.

mod helpers;

use assert_cmd::Command;
use axum::Json;
use axum::Router;
use axum::routing::get;
use predicates::prelude::*;
use serde_json::json;

use helpers::{closed_port_url, serve_in_background};

fn alertctl() -> Command {
    let mut cmd = Command::cargo_bin("alertctl").unwrap();
    cmd.env_remove("ALERTCTL_URL")
        .env_remove("ALERTCTL_API_VERSION")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    alertctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("alerts"))
        .stdout(predicate::str::contains("silences"));
}

#[test]
fn unknown_api_version_is_rejected() {
    alertctl()
        .args(["--api-version", "v3", "alerts", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("v3"));
}

#[test]
fn api_version_from_environment_is_validated() {
    alertctl()
        .env("ALERTCTL_API_VERSION", "v9")
        .args(["alerts", "list"])
        .assert()
        .failure();
}

#[test]
fn url_without_scheme_is_rejected() {
    alertctl()
        .args(["--url", "localhost:9093", "alerts", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn malformed_matcher_is_rejected() {
    alertctl()
        .args(["--url", &closed_port_url()])
        .args(["silences", "create", "--comment", "x", "--matcher", "noequalsign"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid matcher format 'noequalsign'"));
}

#[test]
fn create_without_matchers_is_rejected() {
    alertctl()
        .args(["--url", &closed_port_url()])
        .args(["silences", "create", "--comment", "maintenance"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one matcher must be specified"));
}

#[test]
fn create_with_empty_comment_is_rejected() {
    alertctl()
        .args(["--url", &closed_port_url()])
        .args(["silences", "create", "--alertname", "Disk", "--comment", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("silence comment is required"));
}

#[test]
fn create_without_comment_flag_is_rejected() {
    alertctl()
        .args(["silences", "create", "--alertname", "Disk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--comment"));
}

#[test]
fn bad_duration_is_rejected() {
    alertctl()
        .args(["silences", "create", "--alertname", "Disk", "--comment", "x"])
        .args(["--duration", "forever"])
        .assert()
        .failure();
}

#[test]
fn unreachable_server_fails() {
    alertctl()
        .args(["--url", &closed_port_url(), "alerts", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: request failed"));
}

fn mock_alertmanager() -> String {
    let router = Router::new()
        .route(
            "/api/v2/alerts",
            get(|| async {
                Json(json!([
                    {
                        "labels": {"alertname": "Disk", "severity": "critical", "instance": "h1"},
                        "annotations": {"summary": "disk almost full"},
                        "status": {"state": "", "silencedBy": [], "inhibitedBy": []}
                    },
                    {
                        "labels": {"alertname": "Load", "severity": "warning", "instance": "h2"},
                        "status": {"state": "", "silencedBy": ["s1"], "inhibitedBy": []}
                    }
                ]))
            }),
        )
        .route(
            "/api/v2/silences",
            get(|| async { Json(json!([])) })
                .post(|| async { Json(json!({"silenceID": "abc"})) }),
        );
    serve_in_background(router)
}

#[test]
fn alerts_list_prints_active_rows() {
    let url = mock_alertmanager();

    let assert = alertctl()
        .args(["--url", &url, "alerts", "list"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].starts_with("ALERT"));
    assert!(lines[1].starts_with("Disk"));
    assert!(lines[1].contains("disk almost full"));
}

#[test]
fn alerts_list_all_shows_detail_columns() {
    let url = mock_alertmanager();

    alertctl()
        .args(["--url", &url, "alerts", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SILENCED BY"))
        .stdout(predicate::str::contains("Load"));
}

#[test]
fn alerts_list_reports_empty_filter() {
    let url = mock_alertmanager();

    alertctl()
        .args(["--url", &url, "alerts", "list", "--severity", "info"])
        .assert()
        .success()
        .stdout("No alerts found in state: active with severity 'info'\n");
}

#[test]
fn alerts_list_json_output() {
    let url = mock_alertmanager();

    let assert = alertctl()
        .args(["--url", &url, "--format", "json", "alerts", "list", "--silenced"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["labels"]["alertname"], "Load");
    assert_eq!(value[0]["state"], "silenced");
}

#[test]
fn silences_list_reports_none() {
    let url = mock_alertmanager();

    alertctl()
        .args(["--url", &url, "silences", "list"])
        .assert()
        .success()
        .stdout("No active silences found\n");
}

#[test]
fn silences_create_prints_id() {
    let url = mock_alertmanager();

    alertctl()
        .args(["--url", &url, "silences", "create"])
        .args(["--alertname", "Disk", "--comment", "swap disk", "--duration", "30m"])
        .assert()
        .success()
        .stdout("Successfully created silence with ID: abc\n");
}
