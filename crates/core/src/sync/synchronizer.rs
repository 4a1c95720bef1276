// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The synchronizer abstraction and the diff shared by every backend.

use serde::Serialize;

use crate::issue::{normalize_labels, Issue, IssueStatus};

use super::client::IssueData;

/// Outcome of syncing one issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    pub issue_id: i64,
    pub success: bool,
    pub title_updated: bool,
    pub status_updated: bool,
    pub labels_updated: bool,
    pub error: Option<String>,
}

impl SyncResult {
    pub fn failure(issue_id: i64, error: impl Into<String>) -> Self {
        SyncResult {
            issue_id,
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// True if any mirrored field changed.
    pub fn changed(&self) -> bool {
        self.title_updated || self.status_updated || self.labels_updated
    }
}

/// Owns the sync lifecycle for issues of one tracker kind.
pub trait Synchronizer: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// True if the issue's canonical URL has this backend's shape.
    fn can_sync(&self, issue: &Issue) -> bool;

    /// Fetch fresh data and apply changed fields to `issue` in memory.
    ///
    /// Never touches `last_synced_at`; on failure `issue` is left unchanged.
    fn sync_issue(&self, issue: &mut Issue) -> SyncResult;
}

/// Apply fetched tracker data to `issue`, writing only fields that differ.
pub fn apply_issue_data(issue: &mut Issue, data: &IssueData, status: IssueStatus) -> SyncResult {
    let mut result = SyncResult {
        issue_id: issue.id,
        success: true,
        ..Default::default()
    };

    if data.title != issue.title {
        tracing::info!("updated title for issue {}: {}", issue.id, data.title);
        issue.title = data.title.clone();
        result.title_updated = true;
    }

    if status != issue.status {
        tracing::info!(
            "updated status for issue {}: {} -> {}",
            issue.id,
            issue.status,
            status
        );
        issue.status = status;
        result.status_updated = true;
    }

    let labels = normalize_labels(&data.labels);
    if labels != normalize_labels(&issue.labels) {
        tracing::info!("updated labels for issue {}: {:?}", issue.id, labels);
        issue.labels = labels;
        result.labels_updated = true;
    }

    result
}

#[cfg(test)]
#[path = "synchronizer_tests.rs"]
mod tests;
