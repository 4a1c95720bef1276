// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{parse_timestamp, Database};

/// A link between an issue and a test result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub issue_id: i64,
    pub test_result_id: i64,
    /// The rule that produced this link; `None` for manual attachments.
    pub rule_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

fn row_to_attachment(row: &Row) -> rusqlite::Result<Attachment> {
    let created_str: String = row.get(4)?;
    Ok(Attachment {
        id: row.get(0)?,
        issue_id: row.get(1)?,
        test_result_id: row.get(2)?,
        rule_id: row.get(3)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

impl Database {
    /// Attach an issue to a test result. An existing link is left as is.
    ///
    /// Returns true if a new row was inserted.
    pub fn insert_attachment(
        &self,
        issue_id: i64,
        test_result_id: i64,
        rule_id: Option<i64>,
    ) -> Result<bool> {
        self.conn.execute(
            "INSERT OR IGNORE INTO attachments (issue_id, test_result_id, rule_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![issue_id, test_result_id, rule_id, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.changes() > 0)
    }

    /// Remove a link. Returns true if one existed.
    pub fn remove_attachment(&self, issue_id: i64, test_result_id: i64) -> Result<bool> {
        let affected = self.conn.execute(
            "DELETE FROM attachments WHERE issue_id = ?1 AND test_result_id = ?2",
            params![issue_id, test_result_id],
        )?;
        Ok(affected > 0)
    }

    /// Attachments of a test result, oldest first.
    pub fn attachments_for_result(&self, test_result_id: i64) -> Result<Vec<Attachment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, test_result_id, rule_id, created_at FROM attachments
             WHERE test_result_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![test_result_id], row_to_attachment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Attachments of an issue, oldest first.
    pub fn attachments_for_issue(&self, issue_id: i64) -> Result<Vec<Attachment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, test_result_id, rule_id, created_at FROM attachments
             WHERE issue_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![issue_id], row_to_attachment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "attachments_tests.rs"]
mod tests;
