// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Launchpad REST client.
//!
//! Launchpad bugs have a global numeric id and carry status per bug task,
//! one task per affected target. The client picks the task whose target
//! matches the issue's project and falls back to the first task.

use std::fs;
use std::path::Path;

use chrono::Utc;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use triage_core::sync::{ClientError, IssueClient, IssueData};

use crate::config::LaunchpadConfig;
use crate::http::{build_client, fetch_json, join_url};

const OAUTH_REALM: &str = "https://api.launchpad.net/";

/// OAuth tokens as written by launchpadlib's `login_with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchpadCredentials {
    pub consumer_key: String,
    pub access_token: String,
    pub access_secret: String,
}

impl LaunchpadCredentials {
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let text = fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!(
                "cannot read Launchpad credentials {}: {e}",
                path.display()
            ))
        })?;
        Self::parse(&text)
    }

    /// Parse the INI-style credentials file (`consumer_key = ...` lines).
    pub fn parse(text: &str) -> Result<Self, ClientError> {
        let mut consumer_key = None;
        let mut access_token = None;
        let mut access_secret = None;

        for line in text.lines() {
            let line = line.trim();
            if line.starts_with('[') || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();
            match name.trim() {
                "consumer_key" => consumer_key = Some(value),
                "access_token" => access_token = Some(value),
                "access_secret" => access_secret = Some(value),
                _ => {}
            }
        }

        let missing = |field: &str| {
            ClientError::Config(format!("Launchpad credentials missing {field}"))
        };
        Ok(LaunchpadCredentials {
            consumer_key: consumer_key.ok_or_else(|| missing("consumer_key"))?,
            access_token: access_token.ok_or_else(|| missing("access_token"))?,
            access_secret: access_secret.ok_or_else(|| missing("access_secret"))?,
        })
    }

    /// PLAINTEXT-signed OAuth 1.0 `Authorization` header value.
    pub fn authorization(&self, timestamp: i64, nonce: &str) -> String {
        format!(
            "OAuth realm=\"{OAUTH_REALM}\", \
             oauth_consumer_key=\"{}\", \
             oauth_token=\"{}\", \
             oauth_signature_method=\"PLAINTEXT\", \
             oauth_signature=\"&{}\", \
             oauth_timestamp=\"{timestamp}\", \
             oauth_nonce=\"{nonce}\", \
             oauth_version=\"1.0\"",
            self.consumer_key, self.access_token, self.access_secret
        )
    }
}

pub struct LaunchpadClient {
    http: Client,
    base_url: String,
    credentials: Option<LaunchpadCredentials>,
}

impl LaunchpadClient {
    /// A credentials file always selects OAuth; otherwise `anonymous` must be set.
    pub fn new(config: &LaunchpadConfig) -> Result<Self, ClientError> {
        let credentials = match &config.credentials_file {
            Some(path) => Some(LaunchpadCredentials::load(path)?),
            None if config.anonymous => None,
            None => {
                return Err(ClientError::Config(
                    "Launchpad login requires credentials_file when anonymous = false"
                        .to_string(),
                ))
            }
        };
        Ok(LaunchpadClient {
            http: build_client(config.timeout_secs)?,
            base_url: config.base_url.clone(),
            credentials,
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.http.get(url).header("Accept", "application/json");
        match &self.credentials {
            Some(creds) => {
                let now = Utc::now();
                let nonce = now.timestamp_nanos_opt().unwrap_or_default().to_string();
                request.header("Authorization", creds.authorization(now.timestamp(), &nonce))
            }
            None => request,
        }
    }
}

impl IssueClient for LaunchpadClient {
    fn get_issue(&self, project: &str, key: &str) -> Result<IssueData, ClientError> {
        let bug_id = parse_bug_id(key)?;
        let bug = fetch_json(
            self.get(&join_url(&self.base_url, &format!("bugs/{bug_id}"))),
            project,
            key,
        )?;

        let tasks = match bug.get("bug_tasks_collection_link").and_then(|l| l.as_str()) {
            Some(link) => Some(fetch_json(self.get(link), project, key)?),
            None => None,
        };
        build_issue(bug, tasks, project)
    }
}

/// Accepts `123`, `#123`, or any URL containing `+bug/123`.
pub fn parse_bug_id(key: &str) -> Result<u64, ClientError> {
    let trimmed = key.trim().trim_start_matches('#');
    let id = match trimmed.rsplit_once("+bug/") {
        Some((_, rest)) => rest.split('/').next().unwrap_or_default(),
        None => trimmed,
    };
    id.parse()
        .map_err(|_| ClientError::Config(format!("invalid Launchpad bug id: {key:?}")))
}

#[derive(Deserialize)]
struct LaunchpadBug {
    title: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Deserialize)]
struct TaskCollection {
    #[serde(default)]
    entries: Vec<BugTask>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BugTask {
    #[serde(default)]
    bug_target_name: Option<String>,
    #[serde(default)]
    bug_target_display_name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    is_complete: Option<bool>,
}

impl BugTask {
    fn targets(&self, project: &str) -> bool {
        [&self.bug_target_name, &self.bug_target_display_name]
            .into_iter()
            .flatten()
            .any(|name| name.trim().eq_ignore_ascii_case(project))
    }
}

pub(crate) fn choose_task<'a>(tasks: &'a [BugTask], project: &str) -> Option<&'a BugTask> {
    let project = project.trim();
    if !project.is_empty() {
        if let Some(task) = tasks.iter().find(|t| t.targets(project)) {
            return Some(task);
        }
    }
    tasks.first()
}

/// Combine the bug and its task collection into [`IssueData`].
///
/// The chosen task's status becomes both the state and the reason; its
/// `is_complete` flag is passed through for status normalization.
pub(crate) fn build_issue(
    bug: serde_json::Value,
    tasks: Option<serde_json::Value>,
    project: &str,
) -> Result<IssueData, ClientError> {
    let parsed: LaunchpadBug = serde_json::from_value(bug.clone())
        .map_err(|e| ClientError::InvalidResponse(format!("Launchpad bug: {e}")))?;
    let tasks = match tasks {
        Some(value) => {
            serde_json::from_value::<TaskCollection>(value)
                .map_err(|e| ClientError::InvalidResponse(format!("Launchpad bug tasks: {e}")))?
                .entries
        }
        None => Vec::new(),
    };

    let task = choose_task(&tasks, project);
    let status = task.and_then(|t| t.status.clone());
    Ok(IssueData {
        title: parsed.title.trim().to_string(),
        state: status.clone().unwrap_or_default(),
        state_reason: status,
        labels: parsed.tags,
        is_complete: task.and_then(|t| t.is_complete),
        raw: bug,
    })
}

#[cfg(test)]
#[path = "launchpad_tests.rs"]
mod tests;
