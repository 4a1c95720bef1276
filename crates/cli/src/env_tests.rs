// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::TRIAGE_CONFIG, "TRIAGE_CONFIG");
    assert_eq!(vars::TRIAGE_DB, "TRIAGE_DB");
    assert_eq!(vars::TRIAGE_GITHUB_TOKEN, "TRIAGE_GITHUB_TOKEN");
    assert_eq!(vars::TRIAGE_JIRA_EMAIL, "TRIAGE_JIRA_EMAIL");
    assert_eq!(vars::TRIAGE_JIRA_TOKEN, "TRIAGE_JIRA_TOKEN");
    assert_eq!(
        vars::TRIAGE_LAUNCHPAD_CREDENTIALS,
        "TRIAGE_LAUNCHPAD_CREDENTIALS"
    );
}

#[test]
fn test_db_path_unset() {
    std::env::remove_var("TRIAGE_DB");
    assert!(db_path().is_none());
}

#[test]
fn test_db_path_set() {
    std::env::set_var("TRIAGE_DB", "/tmp/triage-test.db");
    assert_eq!(db_path(), Some(PathBuf::from("/tmp/triage-test.db")));
    std::env::remove_var("TRIAGE_DB");
}

#[test]
fn test_blank_token_is_unset() {
    std::env::set_var("TRIAGE_JIRA_TOKEN", "   ");
    assert!(jira_token().is_none());
    std::env::remove_var("TRIAGE_JIRA_TOKEN");
}

#[test]
fn test_launchpad_credentials_set() {
    std::env::set_var("TRIAGE_LAUNCHPAD_CREDENTIALS", "/etc/lp.creds");
    assert_eq!(
        launchpad_credentials(),
        Some(PathBuf::from("/etc/lp.creds"))
    );
    std::env::remove_var("TRIAGE_LAUNCHPAD_CREDENTIALS");
}
