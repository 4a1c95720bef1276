// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed storage for issues, rules, test results and their links.
//!
//! The [`Database`] struct is split across submodules by table group; each
//! submodule adds an `impl Database` block.

mod attachments;
mod issues;
mod reruns;
mod results;
mod rules;

pub use attachments::Attachment;
pub use reruns::RerunRequest;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;

use crate::error::{Error, Result};

/// SQL schema for the triage database.
pub const SCHEMA: &str = r#"
-- Mirrored tracker issues
CREATE TABLE IF NOT EXISTS issues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL,              -- github|jira|launchpad
    project TEXT NOT NULL,
    key TEXT NOT NULL,
    title TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'unknown',
    auto_rerun_enabled INTEGER NOT NULL DEFAULT 0,
    last_synced_at TEXT,
    last_sync_error TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (source, project, key)
);

CREATE TABLE IF NOT EXISTS issue_labels (
    issue_id INTEGER NOT NULL,
    label TEXT NOT NULL,
    PRIMARY KEY (issue_id, label),
    FOREIGN KEY (issue_id) REFERENCES issues(id) ON DELETE CASCADE
);

-- Attachment rules, one owning issue each
CREATE TABLE IF NOT EXISTS attachment_rules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id INTEGER NOT NULL,
    enabled INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    FOREIGN KEY (issue_id) REFERENCES issues(id) ON DELETE CASCADE
);

-- Rule criteria lists; no rows for a kind means wildcard
CREATE TABLE IF NOT EXISTS rule_criteria (
    rule_id INTEGER NOT NULL,
    kind TEXT NOT NULL,                -- family|environment|test_case|template|status
    value TEXT NOT NULL,
    PRIMARY KEY (rule_id, kind, value),
    FOREIGN KEY (rule_id) REFERENCES attachment_rules(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS rule_metadata (
    rule_id INTEGER NOT NULL,
    category TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (rule_id, category, value),
    FOREIGN KEY (rule_id) REFERENCES attachment_rules(id) ON DELETE CASCADE
);

-- Test results, denormalized to the columns the matcher reads
CREATE TABLE IF NOT EXISTS test_results (
    id INTEGER PRIMARY KEY,
    test_execution_id INTEGER NOT NULL,
    test_plan_id INTEGER NOT NULL,
    artefact_build_id INTEGER NOT NULL,
    environment_id INTEGER NOT NULL,
    environment_name TEXT NOT NULL,
    family TEXT NOT NULL,
    test_case_name TEXT NOT NULL,
    template_id TEXT,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS execution_metadata (
    test_execution_id INTEGER NOT NULL,
    category TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (test_execution_id, category, value)
);

-- Issue to test result links; rule_id NULL means manually attached
CREATE TABLE IF NOT EXISTS attachments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id INTEGER NOT NULL,
    test_result_id INTEGER NOT NULL,
    rule_id INTEGER,
    created_at TEXT NOT NULL,
    UNIQUE (issue_id, test_result_id),
    FOREIGN KEY (issue_id) REFERENCES issues(id) ON DELETE CASCADE,
    FOREIGN KEY (test_result_id) REFERENCES test_results(id) ON DELETE CASCADE,
    FOREIGN KEY (rule_id) REFERENCES attachment_rules(id) ON DELETE SET NULL
);

-- Pending rerun requests, consumed by the rerun dispatcher
CREATE TABLE IF NOT EXISTS rerun_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    test_plan_id INTEGER NOT NULL,
    artefact_build_id INTEGER NOT NULL,
    environment_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (test_plan_id, artefact_build_id, environment_id)
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_issues_status ON issues(status);
CREATE INDEX IF NOT EXISTS idx_rules_issue ON attachment_rules(issue_id);
CREATE INDEX IF NOT EXISTS idx_results_execution ON test_results(test_execution_id);
CREATE INDEX IF NOT EXISTS idx_attachments_result ON attachments(test_result_id);
CREATE INDEX IF NOT EXISTS idx_attachments_rule ON attachments(rule_id);
"#;

/// Parse a string value from the database, returning a rusqlite error on parse failure.
pub(crate) fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
pub(crate) fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Parse a nullable RFC3339 timestamp from the database.
pub(crate) fn parse_timestamp_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.map(|v| parse_timestamp(&v, column)).transpose()
}

/// Run schema creation on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite database connection with triage operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrency
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
