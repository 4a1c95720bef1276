// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    github = { IssueSource::Github, "canonical/test_observer", "71", "https://github.com/canonical/test_observer/issues/71" },
    jira = { IssueSource::Jira, "TO", "142", "https://warthogs.atlassian.net/browse/TO-142" },
    launchpad = { IssueSource::Launchpad, "ubuntu", "2049283", "https://bugs.launchpad.net/ubuntu/+bug/2049283" },
)]
fn canonical_url_formats(source: IssueSource, project: &str, key: &str, expected: &str) {
    assert_eq!(canonical_url(source, project, key), expected);
}

#[parameterized(
    github = { "https://github.com/Canonical/Snapd/issues/12", IssueSource::Github, "canonical/snapd", "12" },
    github_query = { "https://github.com/canonical/snapd/issues/12?foo=1#c3", IssueSource::Github, "canonical/snapd", "12" },
    jira_lower = { "https://warthogs.atlassian.net/browse/to-142", IssueSource::Jira, "TO", "142" },
    jira_underscore = { "https://warthogs.atlassian.net/browse/MY_PROJ-12", IssueSource::Jira, "MY_PROJ", "12" },
    launchpad_slash = { "https://bugs.launchpad.net/ubuntu/+bug/2049283/", IssueSource::Launchpad, "ubuntu", "2049283" },
)]
fn parse_issue_url_valid(url: &str, source: IssueSource, project: &str, key: &str) {
    let id = parse_issue_url(url).unwrap();
    assert_eq!(id.source, source);
    assert_eq!(id.project, project);
    assert_eq!(id.key, key);
}

#[parameterized(
    gitlab = { "https://gitlab.com/owner/repo/-/issues/3" },
    github_pull = { "https://github.com/owner/repo/pull/3" },
    other_jira = { "https://example.atlassian.net/browse/TO-1" },
    launchpad_no_bug = { "https://bugs.launchpad.net/ubuntu" },
    garbage = { "not a url" },
)]
fn parse_issue_url_invalid(url: &str) {
    assert!(matches!(parse_issue_url(url), Err(Error::InvalidUrl(_))));
}

#[test]
fn parse_then_format_is_canonical() {
    let id = parse_issue_url("http://github.com/Owner/Repo/issues/5/").unwrap();
    assert_eq!(id.url(), "https://github.com/owner/repo/issues/5");
}
