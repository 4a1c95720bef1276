// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::issue::{normalize_labels, Issue, IssueIdentity, IssueSource, IssueStatus};

use super::{parse_db, parse_timestamp, parse_timestamp_opt, Database};

const ISSUE_COLUMNS: &str = "id, source, project, key, title, status, auto_rerun_enabled,
     last_synced_at, last_sync_error, created_at, updated_at";

/// Map a row selected with [`ISSUE_COLUMNS`]; labels are loaded separately.
fn row_to_issue(row: &Row) -> rusqlite::Result<Issue> {
    let source_str: String = row.get(1)?;
    let status_str: String = row.get(5)?;
    let created_str: String = row.get(9)?;
    let updated_str: String = row.get(10)?;

    Ok(Issue {
        id: row.get(0)?,
        source: parse_db(&source_str, "source")?,
        project: row.get(2)?,
        key: row.get(3)?,
        title: row.get(4)?,
        status: parse_db(&status_str, "status")?,
        labels: Vec::new(),
        auto_rerun_enabled: row.get(6)?,
        last_synced_at: parse_timestamp_opt(row.get(7)?, "last_synced_at")?,
        last_sync_error: row.get(8)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

impl Database {
    /// Fetch the issue with this identity, creating it if absent.
    ///
    /// Returns the issue and whether it was newly created. New issues start
    /// with an empty title and `unknown` status until their first sync.
    pub fn get_or_create_issue(&self, identity: &IssueIdentity) -> Result<(Issue, bool)> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR IGNORE INTO issues (source, project, key, title, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, '', ?4, ?5, ?5)",
            params![
                identity.source.as_str(),
                identity.project,
                identity.key,
                IssueStatus::Unknown.as_str(),
                now
            ],
        )?;
        let created = self.conn.changes() > 0;

        match self.find_issue(identity)? {
            Some(issue) => Ok((issue, created)),
            None => Err(Error::CorruptedData(format!(
                "issue {} vanished after insert",
                identity.url()
            ))),
        }
    }

    /// Look up an issue by identity.
    pub fn find_issue(&self, identity: &IssueIdentity) -> Result<Option<Issue>> {
        let sql = format!(
            "SELECT {ISSUE_COLUMNS} FROM issues WHERE source = ?1 AND project = ?2 AND key = ?3"
        );
        let issue = self
            .conn
            .query_row(
                &sql,
                params![identity.source.as_str(), identity.project, identity.key],
                row_to_issue,
            )
            .optional()?;

        match issue {
            Some(mut issue) => {
                issue.labels = self.get_labels(issue.id)?;
                Ok(Some(issue))
            }
            None => Ok(None),
        }
    }

    /// Get an issue by ID.
    pub fn get_issue(&self, id: i64) -> Result<Issue> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1");
        let issue = self
            .conn
            .query_row(&sql, params![id], row_to_issue)
            .optional()?;

        let mut issue = issue.ok_or(Error::IssueNotFound(id))?;
        issue.labels = self.get_labels(id)?;
        Ok(issue)
    }

    /// Check if an issue exists.
    pub fn issue_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM issues WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// List issues ordered by ID, optionally narrowed by status and source.
    pub fn list_issues(
        &self,
        status: Option<IssueStatus>,
        source: Option<IssueSource>,
    ) -> Result<Vec<Issue>> {
        let sql = format!(
            "SELECT {ISSUE_COLUMNS} FROM issues
             WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR source = ?2)
             ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut issues = stmt
            .query_map(
                params![status.map(|s| s.as_str()), source.map(|s| s.as_str())],
                row_to_issue,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for issue in &mut issues {
            issue.labels = self.get_labels(issue.id)?;
        }
        Ok(issues)
    }

    /// Operator edit of title and/or status.
    pub fn edit_issue(
        &self,
        id: i64,
        title: Option<&str>,
        status: Option<IssueStatus>,
    ) -> Result<Issue> {
        let mut issue = self.get_issue(id)?;
        if let Some(title) = title {
            issue.title = title.to_string();
        }
        if let Some(status) = status {
            issue.status = status;
        }
        self.save_issue_fields(&issue, Utc::now())?;
        self.get_issue(id)
    }

    /// Toggle whether rule-driven attachments to this issue request reruns.
    pub fn set_auto_rerun(&self, id: i64, enabled: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE issues SET auto_rerun_enabled = ?1 WHERE id = ?2",
            params![enabled, id],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::IssueNotFound(id));
        }
        Ok(())
    }

    /// Write title, status and labels of `issue`, bumping `updated_at`.
    pub fn save_issue_fields(&self, issue: &Issue, now: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "UPDATE issues SET title = ?1, status = ?2, updated_at = ?3 WHERE id = ?4",
            params![issue.title, issue.status.as_str(), now.to_rfc3339(), issue.id],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::IssueNotFound(issue.id));
        }
        self.set_labels(issue.id, &issue.labels)
    }

    /// Stamp a successful sync and clear any stored error.
    pub fn mark_synced(&self, id: i64, at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "UPDATE issues SET last_synced_at = ?1, last_sync_error = NULL WHERE id = ?2",
            params![at.to_rfc3339(), id],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::IssueNotFound(id));
        }
        Ok(())
    }

    /// Record a failed sync. `last_synced_at` is left untouched.
    pub fn record_sync_error(&self, id: i64, error: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE issues SET last_sync_error = ?1 WHERE id = ?2",
            params![error, id],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::IssueNotFound(id));
        }
        Ok(())
    }

    /// Get all labels for an issue, sorted.
    pub fn get_labels(&self, issue_id: i64) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT label FROM issue_labels WHERE issue_id = ?1 ORDER BY label")?;

        let labels = stmt
            .query_map(params![issue_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(labels)
    }

    /// Replace the label set of an issue.
    pub fn set_labels(&self, issue_id: i64, labels: &[String]) -> Result<()> {
        self.conn.execute(
            "DELETE FROM issue_labels WHERE issue_id = ?1",
            params![issue_id],
        )?;
        for label in normalize_labels(labels) {
            self.conn.execute(
                "INSERT OR IGNORE INTO issue_labels (issue_id, label) VALUES (?1, ?2)",
                params![issue_id, label],
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "issues_tests.rs"]
mod tests;
