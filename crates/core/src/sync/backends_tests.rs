// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::issue::IssueSource;
use crate::sync::test_helpers::{issue_data, make_issue, FakeClient};
use chrono::Utc;
use yare::parameterized;

fn all() -> Vec<Box<dyn Synchronizer>> {
    vec![
        Box::new(GithubSynchronizer::new(Box::new(FakeClient::new()))),
        Box::new(JiraSynchronizer::new(Box::new(FakeClient::new()))),
        Box::new(LaunchpadSynchronizer::new(Box::new(FakeClient::new()))),
    ]
}

#[parameterized(
    github = { IssueSource::Github, "github" },
    jira = { IssueSource::Jira, "jira" },
    launchpad = { IssueSource::Launchpad, "launchpad" },
)]
fn exactly_one_backend_claims_each_source(source: IssueSource, expected: &str) {
    let issue = make_issue(1, source, IssueStatus::Open, None, Utc::now());
    let claimed: Vec<&str> = all()
        .iter()
        .filter(|s| s.can_sync(&issue))
        .map(|s| s.name())
        .collect();
    assert_eq!(claimed, vec![expected]);
}

#[parameterized(
    launchpad_named_jira = { IssueSource::Launchpad, "jira-cli", "launchpad" },
    launchpad_named_github = { IssueSource::Launchpad, "github.com-mirror", "launchpad" },
    github_named_jira = { IssueSource::Github, "owner/jira", "github" },
    github_named_launchpad = { IssueSource::Github, "launchpad.net/tools", "github" },
    jira_named_github = { IssueSource::Jira, "GITHUB", "jira" },
)]
fn project_names_do_not_steal_claims(source: IssueSource, project: &str, expected: &str) {
    let mut issue = make_issue(7, source, IssueStatus::Open, None, Utc::now());
    issue.project = project.to_string();
    let claimed: Vec<&str> = all()
        .iter()
        .filter(|s| s.can_sync(&issue))
        .map(|s| s.name())
        .collect();
    assert_eq!(claimed, vec![expected]);
}

#[test]
fn jira_sync_normalizes_status() {
    let client = FakeClient::new().with_issue("TO", "1", issue_data("Crash", "Done", &[]));
    let sync = JiraSynchronizer::new(Box::new(client.clone()));
    let mut issue = make_issue(1, IssueSource::Jira, IssueStatus::Open, None, Utc::now());

    let result = sync.sync_issue(&mut issue);
    assert!(result.success);
    assert!(result.status_updated);
    assert_eq!(issue.status, IssueStatus::Closed);
    assert_eq!(issue.title, "Crash");
    assert_eq!(client.calls(), 1);
}

#[test]
fn jira_unrecognized_state_is_unknown() {
    let client = FakeClient::new().with_issue("TO", "1", issue_data("t", "Triage", &[]));
    let sync = JiraSynchronizer::new(Box::new(client));
    let mut issue = make_issue(1, IssueSource::Jira, IssueStatus::Open, None, Utc::now());

    sync.sync_issue(&mut issue);
    assert_eq!(issue.status, IssueStatus::Unknown);
}

#[test]
fn launchpad_prefers_completeness_flag() {
    let mut data = issue_data("Kernel panic", "New", &["regression"]);
    data.is_complete = Some(true);
    let client = FakeClient::new().with_issue("ubuntu", "1", data);
    let sync = LaunchpadSynchronizer::new(Box::new(client));
    let mut issue = make_issue(1, IssueSource::Launchpad, IssueStatus::Open, None, Utc::now());

    let result = sync.sync_issue(&mut issue);
    assert!(result.status_updated);
    assert!(result.labels_updated);
    assert_eq!(issue.status, IssueStatus::Closed);
}

#[test]
fn github_not_found_leaves_issue_untouched() {
    let client = FakeClient::new();
    let sync = GithubSynchronizer::new(Box::new(client));
    let original = make_issue(1, IssueSource::Github, IssueStatus::Open, None, Utc::now());
    let mut issue = original.clone();

    let result = sync.sync_issue(&mut issue);
    assert!(!result.success);
    assert!(result.error.unwrap().contains("not found"));
    assert_eq!(issue, original);
}

#[test]
fn upstream_error_is_reported_as_text() {
    let client = FakeClient::new().with_error(
        "owner/repo",
        "1",
        ClientError::RateLimited {
            retry_after: Some(60),
        },
    );
    let sync = GithubSynchronizer::new(Box::new(client));
    let mut issue = make_issue(1, IssueSource::Github, IssueStatus::Open, None, Utc::now());

    let result = sync.sync_issue(&mut issue);
    assert_eq!(result.error.as_deref(), Some("rate limited, retry after 60s"));
}
