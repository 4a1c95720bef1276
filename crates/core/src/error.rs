// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for triage-core operations.

use thiserror::Error;

/// All possible errors that can occur in triage-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("issue not found: {0}")]
    IssueNotFound(i64),

    #[error("attachment rule not found: {0}")]
    RuleNotFound(i64),

    #[error("test result not found: {0}")]
    TestResultNotFound(i64),

    #[error("No synchronizer available for URL: {0}")]
    UnsupportedSource(String),

    #[error("{0}")]
    Validation(String),

    #[error("invalid sync priority: '{0}'\n  hint: valid priorities are: high, medium, low")]
    InvalidPriority(String),

    #[error("invalid issue source: '{0}'\n  hint: valid sources are: github, jira, launchpad")]
    InvalidSource(String),

    #[error("invalid issue status: '{0}'\n  hint: valid statuses are: open, closed, unknown")]
    InvalidStatus(String),

    #[error("invalid family: '{0}'\n  hint: valid families are: snap, deb, charm, image")]
    InvalidFamily(String),

    #[error("invalid test result status: '{0}'\n  hint: valid statuses are: passed, failed, skipped")]
    InvalidResultStatus(String),

    #[error("Unrecognized issue URL format: '{0}'\n  hint: expected a GitHub issue, Jira browse or Launchpad bug URL")]
    InvalidUrl(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Returns true for errors that mean "the referenced row does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::IssueNotFound(_) | Error::RuleNotFound(_) | Error::TestResultNotFound(_)
        )
    }
}

/// A specialized Result type for triage-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
