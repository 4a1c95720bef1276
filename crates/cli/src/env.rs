// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables read by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule. `RUST_LOG` is read by
//! the log filter directly.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Non-empty value of `name`, if set.
fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the value of `TRIAGE_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    non_empty(vars::TRIAGE_CONFIG).map(PathBuf::from)
}

/// Returns the value of `TRIAGE_DB` if set.
pub fn db_path() -> Option<PathBuf> {
    non_empty(vars::TRIAGE_DB).map(PathBuf::from)
}

pub fn github_token() -> Option<String> {
    non_empty(vars::TRIAGE_GITHUB_TOKEN)
}

pub fn jira_email() -> Option<String> {
    non_empty(vars::TRIAGE_JIRA_EMAIL)
}

pub fn jira_token() -> Option<String> {
    non_empty(vars::TRIAGE_JIRA_TOKEN)
}

pub fn launchpad_credentials() -> Option<PathBuf> {
    non_empty(vars::TRIAGE_LAUNCHPAD_CREDENTIALS).map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
