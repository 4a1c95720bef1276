// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::issue::{Issue, IssueSource, IssueStatus};

use super::client::{ClientError, IssueClient, IssueData};

/// In-memory issue client keyed by `(project, key)`.
#[derive(Clone, Default)]
pub struct FakeClient {
    responses: Arc<Mutex<HashMap<(String, String), Result<IssueData, ClientError>>>>,
    calls: Arc<AtomicUsize>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(self, project: &str, key: &str, data: IssueData) -> Self {
        self.set(project, key, Ok(data));
        self
    }

    pub fn with_error(self, project: &str, key: &str, err: ClientError) -> Self {
        self.set(project, key, Err(err));
        self
    }

    pub fn set(&self, project: &str, key: &str, response: Result<IssueData, ClientError>) {
        if let Ok(mut map) = self.responses.lock() {
            map.insert((project.to_string(), key.to_string()), response);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IssueClient for FakeClient {
    fn get_issue(&self, project: &str, key: &str) -> Result<IssueData, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let map = self
            .responses
            .lock()
            .map_err(|_| ClientError::Transport("poisoned".into()))?;
        map.get(&(project.to_string(), key.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                Err(ClientError::NotFound {
                    project: project.to_string(),
                    key: key.to_string(),
                })
            })
    }
}

pub fn issue_data(title: &str, state: &str, labels: &[&str]) -> IssueData {
    IssueData {
        title: title.to_string(),
        state: state.to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        ..Default::default()
    }
}

/// A detached issue value for pure strategy and synchronizer tests.
pub fn make_issue(
    id: i64,
    source: IssueSource,
    status: IssueStatus,
    last_synced_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
) -> Issue {
    let project = match source {
        IssueSource::Github => "owner/repo",
        IssueSource::Jira => "TO",
        IssueSource::Launchpad => "ubuntu",
    };
    Issue {
        id,
        source,
        project: project.to_string(),
        key: id.to_string(),
        title: String::new(),
        status,
        labels: Vec::new(),
        auto_rerun_enabled: false,
        last_synced_at,
        last_sync_error: None,
        created_at: updated_at,
        updated_at,
    }
}
