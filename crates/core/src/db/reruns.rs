// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::test_result::RerunKey;

use super::{parse_timestamp, Database};

/// A pending request to re-run one test slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerunRequest {
    pub id: i64,
    #[serde(flatten)]
    pub key: RerunKey,
    pub created_at: DateTime<Utc>,
}

fn row_to_rerun(row: &Row) -> rusqlite::Result<RerunRequest> {
    let created_str: String = row.get(4)?;
    Ok(RerunRequest {
        id: row.get(0)?,
        key: RerunKey {
            test_plan_id: row.get(1)?,
            artefact_build_id: row.get(2)?,
            environment_id: row.get(3)?,
        },
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

impl Database {
    /// Request a rerun unless one is already pending for the key.
    ///
    /// Returns true if a new request was created.
    pub fn request_rerun(&self, key: RerunKey) -> Result<bool> {
        self.conn.execute(
            "INSERT OR IGNORE INTO rerun_requests
             (test_plan_id, artefact_build_id, environment_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                key.test_plan_id,
                key.artefact_build_id,
                key.environment_id,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(self.conn.changes() > 0)
    }

    /// Pending rerun requests, oldest first.
    pub fn list_rerun_requests(&self) -> Result<Vec<RerunRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, test_plan_id, artefact_build_id, environment_id, created_at
             FROM rerun_requests ORDER BY created_at, id",
        )?;
        let rows = stmt
            .query_map([], row_to_rerun)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Consume rerun requests. Keys with no pending request are ignored.
    ///
    /// Returns how many requests were removed.
    pub fn delete_rerun_requests(&self, keys: &[RerunKey]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut removed = 0;
        for key in keys {
            removed += tx.execute(
                "DELETE FROM rerun_requests
                 WHERE test_plan_id = ?1 AND artefact_build_id = ?2 AND environment_id = ?3",
                params![key.test_plan_id, key.artefact_build_id, key.environment_id],
            )?;
        }
        tx.commit()?;
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "reruns_tests.rs"]
mod tests;
