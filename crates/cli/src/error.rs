// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors surfaced by the `triage` command line.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: no database at {0}\n  hint: run 'triage init' first")]
    NotInitialized(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("cannot determine {0} directory\n  hint: set TRIAGE_CONFIG and TRIAGE_DB explicitly")]
    NoDefaultDir(&'static str),

    #[error("invalid config file {path}: {message}")]
    InvalidConfig { path: String, message: String },

    #[error("invalid term '{term}': {reason}\n  hint: use field=value[,value...], e.g. family=snap or meta:arch=amd64")]
    InvalidTerm { term: String, reason: String },

    #[error("unknown field: '{0}'\n  hint: valid fields are: family, environment, test_case, template, status, meta:<category>{1}")]
    UnknownField(String, &'static str),

    #[error("no test results given\n  hint: pass --result ID[,ID...] or --filter field=value")]
    NoTarget,

    #[error(transparent)]
    Core(#[from] triage_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
