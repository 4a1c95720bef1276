// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::filter::TestResultFilter;
use crate::test_result::{MetadataEntry, TestResultView};

use super::{parse_db, Database};

const RESULT_COLUMNS: &str = "id, test_execution_id, test_plan_id, artefact_build_id,
     environment_id, environment_name, family, test_case_name, template_id, status";

fn row_to_result(row: &Row) -> rusqlite::Result<TestResultView> {
    let family_str: String = row.get(6)?;
    let status_str: String = row.get(9)?;

    Ok(TestResultView {
        id: row.get(0)?,
        test_execution_id: row.get(1)?,
        test_plan_id: row.get(2)?,
        artefact_build_id: row.get(3)?,
        environment_id: row.get(4)?,
        environment_name: row.get(5)?,
        family: parse_db(&family_str, "family")?,
        test_case_name: row.get(7)?,
        template_id: row.get(8)?,
        status: parse_db(&status_str, "status")?,
        metadata: Vec::new(),
    })
}

impl Database {
    /// Store a hydrated test result and its execution metadata.
    ///
    /// Test results are immutable, so recording the same ID again is a no-op.
    /// Returns true if the result was new.
    pub fn record_test_result(&self, view: &TestResultView) -> Result<bool> {
        self.conn.execute(
            "INSERT OR IGNORE INTO test_results (id, test_execution_id, test_plan_id,
             artefact_build_id, environment_id, environment_name, family, test_case_name,
             template_id, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                view.id,
                view.test_execution_id,
                view.test_plan_id,
                view.artefact_build_id,
                view.environment_id,
                view.environment_name,
                view.family.as_str(),
                view.test_case_name,
                view.template_id,
                view.status.as_str(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        let created = self.conn.changes() > 0;

        for entry in &view.metadata {
            self.conn.execute(
                "INSERT OR IGNORE INTO execution_metadata (test_execution_id, category, value)
                 VALUES (?1, ?2, ?3)",
                params![view.test_execution_id, entry.category, entry.value],
            )?;
        }
        Ok(created)
    }

    /// Load a test result with its execution metadata.
    pub fn get_test_result(&self, id: i64) -> Result<TestResultView> {
        let sql = format!("SELECT {RESULT_COLUMNS} FROM test_results WHERE id = ?1");
        let view = self
            .conn
            .query_row(&sql, params![id], row_to_result)
            .optional()?;

        let mut view = view.ok_or(Error::TestResultNotFound(id))?;
        view.metadata = self.get_execution_metadata(view.test_execution_id)?;
        Ok(view)
    }

    /// Metadata entries of a test execution, sorted by category then value.
    pub fn get_execution_metadata(&self, test_execution_id: i64) -> Result<Vec<MetadataEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, value FROM execution_metadata
             WHERE test_execution_id = ?1 ORDER BY category, value",
        )?;
        let entries = stmt
            .query_map(params![test_execution_id], |row| {
                Ok(MetadataEntry {
                    category: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// All stored test results matching `filter`, ordered by ID.
    ///
    /// The filter is validated first, so an empty filter never scans.
    pub fn filter_test_results(&self, filter: &TestResultFilter) -> Result<Vec<TestResultView>> {
        filter.validate()?;

        let sql = format!("SELECT {RESULT_COLUMNS} FROM test_results ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let views = stmt
            .query_map([], row_to_result)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut matched = Vec::new();
        for mut view in views {
            view.metadata = self.get_execution_metadata(view.test_execution_id)?;
            if filter.matches(&view) {
                matched.push(view);
            }
        }
        Ok(matched)
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
