// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection settings for each tracker, as read from `[trackers.*]`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// All tracker sections. A missing section means defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackersConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub launchpad: LaunchpadConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Personal access token. Anonymous requests get a much lower rate limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_github_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraConfig {
    #[serde(default = "default_jira_url")]
    pub base_url: String,
    /// With `token`, selects basic auth (Jira Cloud).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// API token, or a bearer token when `email` is unset (Data Center).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchpadConfig {
    #[serde(default = "default_launchpad_url")]
    pub base_url: String,
    /// launchpadlib credentials file; implies OAuth when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_file: Option<PathBuf>,
    #[serde(default = "default_anonymous")]
    pub anonymous: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_github_url() -> String {
    "https://api.github.com".to_string()
}

fn default_jira_url() -> String {
    "https://warthogs.atlassian.net".to_string()
}

fn default_launchpad_url() -> String {
    "https://api.launchpad.net/devel".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_anonymous() -> bool {
    true
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            token: None,
            base_url: default_github_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        JiraConfig {
            base_url: default_jira_url(),
            email: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        LaunchpadConfig {
            base_url: default_launchpad_url(),
            credentials_file: None,
            anonymous: default_anonymous(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
