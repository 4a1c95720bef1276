// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Jira REST v2 client.

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use triage_core::sync::{ClientError, IssueClient, IssueData};

use crate::config::JiraConfig;
use crate::http::{build_client, fetch_json, join_url};

const FIELDS: &str = "summary,status,labels,resolution";

enum JiraAuth {
    Anonymous,
    Basic { email: String, token: String },
    Bearer(String),
}

pub struct JiraClient {
    http: Client,
    base_url: String,
    auth: JiraAuth,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self, ClientError> {
        let token = config.token.clone().filter(|t| !t.trim().is_empty());
        let email = config.email.clone().filter(|e| !e.trim().is_empty());
        let auth = match (email, token) {
            (Some(email), Some(token)) => JiraAuth::Basic { email, token },
            (None, Some(token)) => JiraAuth::Bearer(token),
            (Some(_), None) => {
                return Err(ClientError::Config(
                    "Jira email is set but no API token was provided".to_string(),
                ))
            }
            (None, None) => JiraAuth::Anonymous,
        };
        Ok(JiraClient {
            http: build_client(config.timeout_secs)?,
            base_url: config.base_url.clone(),
            auth,
        })
    }

    fn issue_url(&self, issue_key: &str) -> String {
        join_url(&self.base_url, &format!("rest/api/2/issue/{issue_key}"))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            JiraAuth::Anonymous => request,
            JiraAuth::Basic { email, token } => request.basic_auth(email, Some(token)),
            JiraAuth::Bearer(token) => request.bearer_auth(token),
        }
    }
}

impl IssueClient for JiraClient {
    fn get_issue(&self, project: &str, key: &str) -> Result<IssueData, ClientError> {
        let issue_key = normalize_issue_key(project, key);
        let request = self
            .http
            .get(self.issue_url(&issue_key))
            .query(&[("fields", FIELDS)])
            .header("Accept", "application/json");
        parse_issue(fetch_json(self.authorize(request), project, key)?)
    }
}

/// Normalize `142`, `#142` or `to-142` into `TO-142`.
pub fn normalize_issue_key(project: &str, key: &str) -> String {
    let key = key.trim().to_uppercase();
    let key = key.trim_start_matches('#');
    let project = project.trim().to_uppercase();
    if !key.contains('-') && !project.is_empty() {
        format!("{project}-{key}")
    } else {
        key.to_string()
    }
}

#[derive(Deserialize)]
struct JiraIssue {
    fields: JiraFields,
}

#[derive(Deserialize)]
struct JiraFields {
    summary: String,
    status: Named,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    resolution: Option<Named>,
}

#[derive(Deserialize)]
struct Named {
    name: String,
}

/// The native status name becomes the state; the resolution, if any, the reason.
pub(crate) fn parse_issue(value: serde_json::Value) -> Result<IssueData, ClientError> {
    let issue: JiraIssue = serde_json::from_value(value.clone())
        .map_err(|e| ClientError::InvalidResponse(format!("Jira issue: {e}")))?;
    let fields = issue.fields;
    Ok(IssueData {
        title: fields.summary,
        state: fields.status.name,
        state_reason: fields.resolution.map(|r| r.name),
        labels: fields.labels,
        is_complete: None,
        raw: value,
    })
}

#[cfg(test)]
#[path = "jira_tests.rs"]
mod tests;
