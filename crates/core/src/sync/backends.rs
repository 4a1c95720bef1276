// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronizers for GitHub, Jira and Launchpad.

use crate::issue::{Issue, IssueSource, IssueStatus};

use super::client::{ClientError, IssueClient, IssueData};
use super::status::{github_status, jira_status, launchpad_status};
use super::synchronizer::{apply_issue_data, SyncResult, Synchronizer};

/// Shared fetch-then-diff flow; only the status table differs per backend.
fn fetch_and_apply(
    name: &str,
    client: &dyn IssueClient,
    issue: &mut Issue,
    map_status: impl Fn(&IssueData) -> IssueStatus,
) -> SyncResult {
    match client.get_issue(&issue.project, &issue.key) {
        Ok(data) => {
            let status = map_status(&data);
            apply_issue_data(issue, &data, status)
        }
        Err(err) => {
            log_failure(name, issue, &err);
            SyncResult::failure(issue.id, err.to_string())
        }
    }
}

fn log_failure(name: &str, issue: &Issue, err: &ClientError) {
    tracing::warn!(
        "failed to sync {} issue {} from {}: {}",
        name,
        issue.id,
        issue.url(),
        err
    );
}

pub struct GithubSynchronizer {
    client: Box<dyn IssueClient>,
}

impl GithubSynchronizer {
    pub fn new(client: Box<dyn IssueClient>) -> Self {
        GithubSynchronizer { client }
    }
}

impl Synchronizer for GithubSynchronizer {
    fn name(&self) -> &'static str {
        "github"
    }

    fn can_sync(&self, issue: &Issue) -> bool {
        issue.source == IssueSource::Github
    }

    fn sync_issue(&self, issue: &mut Issue) -> SyncResult {
        fetch_and_apply(self.name(), self.client.as_ref(), issue, |d| {
            github_status(&d.state)
        })
    }
}

pub struct JiraSynchronizer {
    client: Box<dyn IssueClient>,
}

impl JiraSynchronizer {
    pub fn new(client: Box<dyn IssueClient>) -> Self {
        JiraSynchronizer { client }
    }
}

impl Synchronizer for JiraSynchronizer {
    fn name(&self) -> &'static str {
        "jira"
    }

    fn can_sync(&self, issue: &Issue) -> bool {
        issue.source == IssueSource::Jira
    }

    fn sync_issue(&self, issue: &mut Issue) -> SyncResult {
        fetch_and_apply(self.name(), self.client.as_ref(), issue, |d| {
            jira_status(&d.state)
        })
    }
}

pub struct LaunchpadSynchronizer {
    client: Box<dyn IssueClient>,
}

impl LaunchpadSynchronizer {
    pub fn new(client: Box<dyn IssueClient>) -> Self {
        LaunchpadSynchronizer { client }
    }
}

impl Synchronizer for LaunchpadSynchronizer {
    fn name(&self) -> &'static str {
        "launchpad"
    }

    fn can_sync(&self, issue: &Issue) -> bool {
        issue.source == IssueSource::Launchpad
    }

    fn sync_issue(&self, issue: &mut Issue) -> SyncResult {
        fetch_and_apply(self.name(), self.client.as_ref(), issue, |d| {
            launchpad_status(&d.state, d.is_complete)
        })
    }
}

#[cfg(test)]
#[path = "backends_tests.rs"]
mod tests;
