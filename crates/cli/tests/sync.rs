// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

/// Every tracker points at a closed local port, so syncs fail fast offline.
const UNREACHABLE: &str = r#"
[sync]
open_interval_secs = 3600
batch_size = 10

[trackers.github]
base_url = "http://127.0.0.1:9"
timeout_secs = 2

[trackers.jira]
base_url = "http://127.0.0.1:9"
timeout_secs = 2

[trackers.launchpad]
base_url = "http://127.0.0.1:9"
timeout_secs = 2
"#;

fn init_offline() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_config(&temp, UNREACHABLE);
    triage(&temp).arg("init").assert().success();
    temp
}

#[test]
fn stats_counts_never_synced() {
    let temp = init_offline();
    add_issue(&temp, GITHUB_URL);
    add_issue(&temp, JIRA_URL);

    triage(&temp)
        .args(["sync", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("never synced:    2"))
        .stdout(predicate::str::contains("total:           2"));
}

#[test]
fn run_reports_failures_without_failing() {
    let temp = init_offline();
    let id = add_issue(&temp, GITHUB_URL);

    triage(&temp)
        .args(["sync", "run", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"));

    triage(&temp)
        .args(["issue", "show", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last synced: never"))
        .stdout(predicate::str::contains("Last sync error:"));
}

#[test]
fn run_json_summary() {
    let temp = init_offline();
    add_issue(&temp, LAUNCHPAD_URL);
    add_issue(&temp, JIRA_URL);

    let output = triage(&temp)
        .args(["sync", "all", "--parallel", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let batch: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(batch["total"], 2);
    assert_eq!(batch["failed"], 2);
}

#[test]
fn medium_tier_skips_open_issues() {
    let temp = init_offline();
    add_issue(&temp, GITHUB_URL);

    triage(&temp)
        .args(["sync", "run", "-p", "medium"])
        .assert()
        .success()
        .stdout(predicate::str::contains("synced 0 issue(s)"));
}

#[test]
fn run_rejects_unknown_priority() {
    let temp = init_offline();
    triage(&temp)
        .args(["sync", "run", "-p", "urgent"])
        .assert()
        .failure();
}

#[test]
fn sync_missing_issue_fails() {
    let temp = init_offline();
    triage(&temp)
        .args(["sync", "issue", "77"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue not found"));
}
