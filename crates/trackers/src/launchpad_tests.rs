// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    plain = { "2045678", 2045678 },
    hash = { "#12", 12 },
    url = { "https://bugs.launchpad.net/ubuntu/+source/linux/+bug/2045678", 2045678 },
    url_with_comment = { "https://bugs.launchpad.net/ubuntu/+bug/99/comments/3", 99 },
)]
fn bug_ids(key: &str, expected: u64) {
    assert_eq!(parse_bug_id(key).unwrap(), expected);
}

#[test]
fn rejects_garbage_bug_id() {
    assert!(matches!(parse_bug_id("lp-abc"), Err(ClientError::Config(_))));
}

fn tasks() -> serde_json::Value {
    json!({
        "total_size": 2,
        "entries": [
            {"bug_target_name": "linux (Ubuntu)", "status": "Confirmed", "is_complete": false},
            {"bug_target_name": "ubuntu", "status": "Fix Released", "is_complete": true}
        ]
    })
}

#[test]
fn picks_task_matching_project() {
    let data = build_issue(
        json!({"title": " Suspend fails ", "tags": ["regression"]}),
        Some(tasks()),
        "Ubuntu",
    )
    .unwrap();
    assert_eq!(data.title, "Suspend fails");
    assert_eq!(data.state, "Fix Released");
    assert_eq!(data.state_reason.as_deref(), Some("Fix Released"));
    assert_eq!(data.is_complete, Some(true));
    assert_eq!(data.labels, vec!["regression"]);
}

#[test]
fn falls_back_to_first_task() {
    let data = build_issue(json!({"title": "t"}), Some(tasks()), "cloud-init").unwrap();
    assert_eq!(data.state, "Confirmed");
    assert_eq!(data.is_complete, Some(false));
}

#[test]
fn bug_without_tasks_has_empty_state() {
    let data = build_issue(json!({"title": "t"}), None, "ubuntu").unwrap();
    assert_eq!(data.state, "");
    assert_eq!(data.state_reason, None);
    assert_eq!(data.is_complete, None);
}

#[test]
fn display_name_also_matches() {
    let tasks: Vec<BugTask> = serde_json::from_value(json!([
        {"bug_target_name": "a", "status": "New"},
        {"bug_target_display_name": "Checkbox", "status": "Triaged"}
    ]))
    .unwrap();
    let task = choose_task(&tasks, "checkbox").unwrap();
    assert_eq!(task.status.as_deref(), Some("Triaged"));
    assert!(choose_task(&[], "checkbox").is_none());
}

const CREDENTIALS: &str = "\
[1]
consumer_key = triage
consumer_secret =
access_token = tok123
access_secret = sec456
";

#[test]
fn parses_launchpadlib_credentials() {
    let creds = LaunchpadCredentials::parse(CREDENTIALS).unwrap();
    assert_eq!(
        creds,
        LaunchpadCredentials {
            consumer_key: "triage".to_string(),
            access_token: "tok123".to_string(),
            access_secret: "sec456".to_string(),
        }
    );
}

#[test]
fn incomplete_credentials_are_rejected() {
    let err = LaunchpadCredentials::parse("[1]\nconsumer_key = triage\n").unwrap_err();
    assert!(err.to_string().contains("access_token"));
}

#[test]
fn authorization_header_is_plaintext_signed() {
    let creds = LaunchpadCredentials::parse(CREDENTIALS).unwrap();
    let header = creds.authorization(1700000000, "n1");
    assert!(header.starts_with("OAuth realm=\"https://api.launchpad.net/\""));
    assert!(header.contains("oauth_consumer_key=\"triage\""));
    assert!(header.contains("oauth_token=\"tok123\""));
    assert!(header.contains("oauth_signature_method=\"PLAINTEXT\""));
    assert!(header.contains("oauth_signature=\"&sec456\""));
    assert!(header.contains("oauth_timestamp=\"1700000000\""));
    assert!(header.contains("oauth_nonce=\"n1\""));
}

#[test]
fn credentials_file_selects_oauth() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lp.creds");
    std::fs::write(&path, CREDENTIALS).unwrap();

    let client = LaunchpadClient::new(&LaunchpadConfig {
        credentials_file: Some(path),
        ..LaunchpadConfig::default()
    })
    .unwrap();
    assert!(client.credentials.is_some());
}

#[test]
fn non_anonymous_without_credentials_is_rejected() {
    let result = LaunchpadClient::new(&LaunchpadConfig {
        anonymous: false,
        ..LaunchpadConfig::default()
    });
    assert!(matches!(result, Err(ClientError::Config(_))));
}

#[test]
fn missing_credentials_file_is_config_error() {
    let result = LaunchpadClient::new(&LaunchpadConfig {
        credentials_file: Some("/nonexistent/lp.creds".into()),
        ..LaunchpadConfig::default()
    });
    assert!(matches!(result, Err(ClientError::Config(_))));
}
