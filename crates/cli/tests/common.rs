// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub const GITHUB_URL: &str = "https://github.com/canonical/checkbox/issues/12";
pub const JIRA_URL: &str = "https://warthogs.atlassian.net/browse/TO-142";
pub const LAUNCHPAD_URL: &str = "https://bugs.launchpad.net/ubuntu/+bug/2045678";

/// `triage` with config and database inside `temp` and no tracker secrets.
pub fn triage(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("triage");
    cmd.env("TRIAGE_CONFIG", temp.path().join("config.toml"))
        .env("TRIAGE_DB", temp.path().join("triage.db"))
        .env_remove("TRIAGE_GITHUB_TOKEN")
        .env_remove("TRIAGE_JIRA_EMAIL")
        .env_remove("TRIAGE_JIRA_TOKEN")
        .env_remove("TRIAGE_LAUNCHPAD_CREDENTIALS")
        .env_remove("RUST_LOG")
        .current_dir(temp.path());
    cmd
}

/// Helper to create an initialized temp directory
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    triage(&temp).arg("init").assert().success();
    temp
}

/// Helper to mirror an issue and return its ID
pub fn add_issue(temp: &TempDir, url: &str) -> i64 {
    let output = triage(temp)
        .args(["issue", "add", url, "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let issue: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    issue["id"].as_i64().unwrap()
}

/// A failed test result for plan 1, build 2, environment 3.
pub fn result_json(id: i64, family: &str, status: &str) -> String {
    serde_json::json!({
        "id": id,
        "test_execution_id": 100 + id,
        "test_plan_id": 1,
        "artefact_build_id": 2,
        "environment_id": 3,
        "environment_name": "rpi4",
        "family": family,
        "test_case_name": "camera/detect",
        "status": status,
        "metadata": [{"category": "arch", "value": "amd64"}]
    })
    .to_string()
}

/// Write `content` as the config file inside `temp`.
pub fn write_config(temp: &TempDir, content: &str) {
    std::fs::write(temp.path().join("config.toml"), content).unwrap();
}
