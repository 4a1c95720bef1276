// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    issue_not_found = { Error::IssueNotFound(42), "42" },
    rule_not_found = { Error::RuleNotFound(7), "rule not found: 7" },
    unsupported = { Error::UnsupportedSource("https://example.com/1".into()), "No synchronizer available" },
    priority = { Error::InvalidPriority("urgent".into()), "high, medium, low" },
    url = { Error::InvalidUrl("https://example.com".into()), "Unrecognized issue URL" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn validation_error_displays_message_verbatim() {
    let err = Error::Validation("filter must not be empty".into());
    assert_eq!(err.to_string(), "filter must not be empty");
}

#[parameterized(
    issue = { Error::IssueNotFound(1), true },
    rule = { Error::RuleNotFound(1), true },
    result = { Error::TestResultNotFound(1), true },
    validation = { Error::Validation("x".into()), false },
    unsupported = { Error::UnsupportedSource("https://example.com".into()), false },
)]
fn error_is_not_found(err: Error, expected: bool) {
    assert_eq!(err.is_not_found(), expected);
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn error_from_rusqlite() {
    let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, Error::Database(_)));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}
