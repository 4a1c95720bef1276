// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::commands::testing::TestContext;
use crate::error::Error;

const GITHUB_URL: &str = "https://github.com/Canonical/Checkbox/issues/12";

#[test]
fn test_add_creates_then_finds() {
    let ctx = TestContext::new();
    add_impl(&ctx.db, GITHUB_URL, Some("Camera flake"), false, OutputFormat::Text).unwrap();
    add_impl(&ctx.db, GITHUB_URL, Some("Ignored"), true, OutputFormat::Json).unwrap();

    let issues = ctx.db.list_issues(None, None).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Camera flake");
    assert_eq!(issues[0].project, "canonical/checkbox");
    assert!(issues[0].auto_rerun_enabled);
    assert_eq!(issues[0].status, IssueStatus::Unknown);
}

#[test]
fn test_add_rejects_unknown_url() {
    let ctx = TestContext::new();
    let err = add_impl(
        &ctx.db,
        "https://gitlab.com/a/b/-/issues/1",
        None,
        false,
        OutputFormat::Text,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Core(triage_core::Error::InvalidUrl(_))));
}

#[test]
fn test_list_filters_parse_and_validate() {
    let ctx = TestContext::new();
    ctx.add_issue(GITHUB_URL);
    ctx.add_issue("https://warthogs.atlassian.net/browse/TO-142");

    list_impl(&ctx.db, Some("unknown"), Some("jira"), OutputFormat::Text).unwrap();
    let err = list_impl(&ctx.db, Some("pending"), None, OutputFormat::Text).unwrap_err();
    assert!(err.to_string().contains("invalid issue status"));
    let err = list_impl(&ctx.db, None, Some("gitlab"), OutputFormat::Json).unwrap_err();
    assert!(err.to_string().contains("invalid issue source"));
}

#[test]
fn test_show_missing_issue() {
    let ctx = TestContext::new();
    let err = show_impl(&ctx.db, 99, OutputFormat::Text).unwrap_err();
    assert_eq!(err.to_string(), "issue not found: 99");
}

#[test]
fn test_edit_updates_fields() {
    let ctx = TestContext::new();
    let issue = ctx.add_issue(GITHUB_URL);
    edit_impl(&ctx.db, issue.id, Some("New title"), Some("closed")).unwrap();

    let issue = ctx.db.get_issue(issue.id).unwrap();
    assert_eq!(issue.title, "New title");
    assert_eq!(issue.status, IssueStatus::Closed);
}

#[test]
fn test_edit_requires_a_field() {
    let ctx = TestContext::new();
    let issue = ctx.add_issue(GITHUB_URL);
    let err = edit_impl(&ctx.db, issue.id, None, None).unwrap_err();
    assert!(err.to_string().contains("nothing to edit"));
}

#[test]
fn test_auto_rerun_toggle() {
    let ctx = TestContext::new();
    let issue = ctx.add_issue(GITHUB_URL);
    auto_rerun_impl(&ctx.db, issue.id, true).unwrap();
    assert!(ctx.db.get_issue(issue.id).unwrap().auto_rerun_enabled);
    auto_rerun_impl(&ctx.db, issue.id, false).unwrap();
    assert!(!ctx.db.get_issue(issue.id).unwrap().auto_rerun_enabled);

    assert!(auto_rerun_impl(&ctx.db, 404, true).is_err());
}
