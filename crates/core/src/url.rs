// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical tracker URLs.
//!
//! Every issue has exactly one canonical URL derived from its source, project
//! and key. Synchronizers route issues by URL shape, so the formatting here
//! and the markers in [`crate::sync`] must agree.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::issue::{IssueIdentity, IssueSource};

pub const GITHUB_HOST: &str = "github.com";
pub const JIRA_HOST: &str = "warthogs.atlassian.net";
pub const LAUNCHPAD_HOST: &str = "bugs.launchpad.net";

static GITHUB_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^https?://(?:www\.)?github\.com/([^/]+/[^/]+)/issues/(\d+)$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});
static JIRA_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^https?://warthogs\.atlassian\.net/browse/([A-Za-z][A-Za-z0-9_]*)-(\d+)$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});
static LAUNCHPAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^https?://bugs\.launchpad\.net/([^/]+)/\+bug/(\d+)$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});

/// Normalize a project identifier for the given source.
pub fn normalize_project(source: IssueSource, project: &str) -> String {
    match source {
        IssueSource::Github => project.to_lowercase(),
        IssueSource::Jira => project.to_uppercase(),
        IssueSource::Launchpad => project.to_string(),
    }
}

/// Format the canonical URL for an issue.
pub fn canonical_url(source: IssueSource, project: &str, key: &str) -> String {
    match source {
        IssueSource::Github => format!("https://{GITHUB_HOST}/{project}/issues/{key}"),
        IssueSource::Jira => format!("https://{JIRA_HOST}/browse/{project}-{key}"),
        IssueSource::Launchpad => format!("https://{LAUNCHPAD_HOST}/{project}/+bug/{key}"),
    }
}

/// Parse a tracker URL into an issue identity.
///
/// Query strings, fragments and a trailing slash are ignored.
pub fn parse_issue_url(raw: &str) -> Result<IssueIdentity> {
    let trimmed = raw.trim();
    let url = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or(trimmed)
        .trim_end_matches('/');

    let (source, re) = if let Some(caps) = GITHUB_RE.captures(url) {
        (IssueSource::Github, caps)
    } else if let Some(caps) = JIRA_RE.captures(url) {
        (IssueSource::Jira, caps)
    } else if let Some(caps) = LAUNCHPAD_RE.captures(url) {
        (IssueSource::Launchpad, caps)
    } else {
        return Err(Error::InvalidUrl(raw.to_string()));
    };

    match (re.get(1), re.get(2)) {
        (Some(project), Some(key)) => IssueIdentity::new(source, project.as_str(), key.as_str()),
        _ => Err(Error::InvalidUrl(raw.to_string())),
    }
}

#[cfg(test)]
#[path = "url_tests.rs"]
mod tests;
