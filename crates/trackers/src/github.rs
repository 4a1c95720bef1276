// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub REST client.

use reqwest::blocking::Client;
use serde::Deserialize;
use triage_core::sync::{ClientError, IssueClient, IssueData};

use crate::config::GithubConfig;
use crate::http::{build_client, fetch_json, join_url};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

pub struct GithubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, ClientError> {
        Ok(GithubClient {
            http: build_client(config.timeout_secs)?,
            base_url: config.base_url.clone(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    fn issue_url(&self, project: &str, number: u64) -> String {
        join_url(&self.base_url, &format!("repos/{project}/issues/{number}"))
    }
}

impl IssueClient for GithubClient {
    fn get_issue(&self, project: &str, key: &str) -> Result<IssueData, ClientError> {
        let number = parse_issue_number(key)?;
        let mut request = self
            .http
            .get(self.issue_url(project, number))
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        parse_issue(fetch_json(request, project, key)?)
    }
}

/// Accepts `42` or `#42`.
pub fn parse_issue_number(key: &str) -> Result<u64, ClientError> {
    key.trim()
        .trim_start_matches('#')
        .parse()
        .map_err(|_| ClientError::Config(format!("invalid GitHub issue number: {key:?}")))
}

#[derive(Deserialize)]
struct GithubIssue {
    title: String,
    state: String,
    #[serde(default)]
    state_reason: Option<String>,
    #[serde(default)]
    labels: Vec<GithubLabel>,
}

/// The API returns label objects, but label names are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum GithubLabel {
    Object { name: String },
    Name(String),
}

impl GithubLabel {
    fn into_name(self) -> String {
        match self {
            GithubLabel::Object { name } | GithubLabel::Name(name) => name,
        }
    }
}

pub(crate) fn parse_issue(value: serde_json::Value) -> Result<IssueData, ClientError> {
    let issue: GithubIssue = serde_json::from_value(value.clone())
        .map_err(|e| ClientError::InvalidResponse(format!("GitHub issue: {e}")))?;
    Ok(IssueData {
        title: issue.title,
        state: issue.state,
        state_reason: issue.state_reason,
        labels: issue.labels.into_iter().map(GithubLabel::into_name).collect(),
        is_complete: None,
        raw: value,
    })
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
