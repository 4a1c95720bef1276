// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locally mirrored tracker issues.
//!
//! An [`Issue`] is identified by its [`IssueSource`], project and key. Title,
//! status and labels are refreshed from the external tracker by the sync
//! service; `auto_rerun_enabled` is only ever changed by an operator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::url;

/// The external tracker an issue lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSource {
    Github,
    Jira,
    Launchpad,
}

impl IssueSource {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSource::Github => "github",
            IssueSource::Jira => "jira",
            IssueSource::Launchpad => "launchpad",
        }
    }

    /// All sources, in display order.
    pub fn all() -> [IssueSource; 3] {
        [
            IssueSource::Github,
            IssueSource::Jira,
            IssueSource::Launchpad,
        ]
    }
}

impl fmt::Display for IssueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "github" => Ok(IssueSource::Github),
            "jira" => Ok(IssueSource::Jira),
            "launchpad" => Ok(IssueSource::Launchpad),
            _ => Err(Error::InvalidSource(s.to_string())),
        }
    }
}

/// Normalized state of an external issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Not synced yet, or the tracker reported a state we do not recognize.
    Unknown,
    Open,
    Closed,
}

impl IssueStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Unknown => "unknown",
            IssueStatus::Open => "open",
            IssueStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "unknown" => Ok(IssueStatus::Unknown),
            "open" => Ok(IssueStatus::Open),
            "closed" => Ok(IssueStatus::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// The identity of an issue: unique across the database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueIdentity {
    pub source: IssueSource,
    pub project: String,
    pub key: String,
}

impl IssueIdentity {
    /// Builds an identity, normalizing the project the way the tracker does
    /// (GitHub repositories are case-insensitive, Jira project keys are uppercase).
    pub fn new(source: IssueSource, project: &str, key: &str) -> Result<Self> {
        let project = project.trim();
        let key = key.trim();
        if project.is_empty() {
            return Err(Error::Validation("issue project cannot be empty".into()));
        }
        if key.is_empty() {
            return Err(Error::Validation("issue key cannot be empty".into()));
        }
        Ok(IssueIdentity {
            source,
            project: url::normalize_project(source, project),
            key: key.to_string(),
        })
    }

    /// Parses an identity out of a tracker URL.
    pub fn from_url(raw: &str) -> Result<Self> {
        url::parse_issue_url(raw)
    }

    /// Canonical URL for this identity.
    pub fn url(&self) -> String {
        url::canonical_url(self.source, &self.project, &self.key)
    }
}

/// A tracker issue mirrored in the local database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub source: IssueSource,
    pub project: String,
    pub key: String,
    pub title: String,
    pub status: IssueStatus,
    /// Sorted and de-duplicated.
    pub labels: Vec<String>,
    pub auto_rerun_enabled: bool,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub last_sync_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Canonical URL, derived from source, project and key.
    pub fn url(&self) -> String {
        url::canonical_url(self.source, &self.project, &self.key)
    }

    pub fn identity(&self) -> IssueIdentity {
        IssueIdentity {
            source: self.source,
            project: self.project.clone(),
            key: self.key.clone(),
        }
    }

    /// True if the issue has never completed a successful sync.
    pub fn never_synced(&self) -> bool {
        self.last_synced_at.is_none()
    }
}

/// Normalize a label list into an ordered set.
///
/// Trackers may return labels in any order and occasionally with duplicates,
/// so comparisons always go through this function first.
pub fn normalize_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = labels
        .into_iter()
        .map(|l| l.as_ref().trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
