// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;
use yare::parameterized;

#[parameterized(
    github = { GITHUB_URL, "github" },
    jira = { JIRA_URL, "jira" },
    launchpad = { LAUNCHPAD_URL, "launchpad" },
)]
fn add_detects_source(url: &str, source: &str) {
    let temp = init_temp();
    let output = triage(&temp)
        .args(["issue", "add", url, "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let issue: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(issue["source"], source);
}

#[test]
fn add_is_idempotent() {
    let temp = init_temp();
    let first = add_issue(&temp, GITHUB_URL);

    triage(&temp)
        .args(["issue", "add", "https://github.com/Canonical/Checkbox/issues/12/"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Found existing issue {first}"
        )));
}

#[test]
fn add_rejects_unknown_tracker() {
    let temp = init_temp();
    triage(&temp)
        .args(["issue", "add", "https://gitlab.com/org/repo/-/issues/3"])
        .assert()
        .failure();
}

#[test]
fn list_filters_by_source() {
    let temp = init_temp();
    add_issue(&temp, GITHUB_URL);
    add_issue(&temp, JIRA_URL);

    triage(&temp)
        .args(["issue", "list", "--source", "jira"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[jira]"))
        .stdout(predicate::str::contains("[github]").not());

    triage(&temp)
        .args(["issue", "list", "--source", "bugzilla"])
        .assert()
        .failure();
}

#[test]
fn edit_and_show() {
    let temp = init_temp();
    let id = add_issue(&temp, LAUNCHPAD_URL);

    triage(&temp)
        .args(["issue", "edit", &id.to_string(), "--title", "Camera fails", "--status", "closed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Updated issue {id}")));

    triage(&temp)
        .args(["issue", "show", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Camera fails"))
        .stdout(predicate::str::contains("Status: closed"))
        .stdout(predicate::str::contains("Last synced: never"));
}

#[test]
fn edit_requires_a_field() {
    let temp = init_temp();
    let id = add_issue(&temp, GITHUB_URL);
    triage(&temp)
        .args(["issue", "edit", &id.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to edit"));
}

#[test]
fn auto_rerun_toggle() {
    let temp = init_temp();
    let id = add_issue(&temp, GITHUB_URL);

    triage(&temp)
        .args(["issue", "auto-rerun", &id.to_string(), "on"])
        .assert()
        .success();
    triage(&temp)
        .args(["issue", "show", &id.to_string()])
        .assert()
        .stdout(predicate::str::contains("Auto-rerun: on"));

    triage(&temp)
        .args(["issue", "auto-rerun", "999", "off"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue not found"));
}

#[test]
fn rules_lifecycle() {
    let temp = init_temp();
    let id = add_issue(&temp, JIRA_URL).to_string();

    triage(&temp)
        .args(["rule", "add", &id, "-m", "family=snap", "-m", "meta:arch=amd64,arm64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("family=snap"))
        .stdout(predicate::str::contains("meta:arch=amd64,arm64"));

    triage(&temp)
        .args(["rule", "disable", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disabled rule 1"));

    triage(&temp)
        .args(["rule", "list", "--issue", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("[disabled]"));

    triage(&temp)
        .args(["rule", "delete", &id, "1"])
        .assert()
        .success();

    triage(&temp)
        .args(["rule", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rules"));
}

#[test]
fn rule_add_rejects_bad_terms() {
    let temp = init_temp();
    let id = add_issue(&temp, GITHUB_URL).to_string();

    triage(&temp)
        .args(["rule", "add", &id, "-m", "family"])
        .assert()
        .failure();
    triage(&temp)
        .args(["rule", "add", &id, "-m", "family=rpm"])
        .assert()
        .failure();
    triage(&temp)
        .args(["rule", "add", &id, "-m", "plan=1"])
        .assert()
        .failure();
}
