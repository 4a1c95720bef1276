// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-tracker tables mapping native states onto [`IssueStatus`].

use crate::issue::IssueStatus;

const JIRA_CLOSED: [&str; 4] = ["done", "closed", "resolved", "complete"];
const JIRA_OPEN: [&str; 4] = ["open", "to do", "in progress", "in review"];
const LAUNCHPAD_CLOSED: [&str; 4] = ["fix released", "invalid", "won't fix", "expired"];

/// GitHub reports `open` or `closed`; anything other than `closed` is open.
pub fn github_status(state: &str) -> IssueStatus {
    if state.trim().eq_ignore_ascii_case("closed") {
        IssueStatus::Closed
    } else {
        IssueStatus::Open
    }
}

/// Jira workflows are customizable, so unrecognized states map to unknown.
pub fn jira_status(state: &str) -> IssueStatus {
    let state = state.trim().to_lowercase();
    if JIRA_CLOSED.contains(&state.as_str()) {
        IssueStatus::Closed
    } else if JIRA_OPEN.contains(&state.as_str()) {
        IssueStatus::Open
    } else {
        IssueStatus::Unknown
    }
}

/// Launchpad's own completeness flag wins over the status name.
pub fn launchpad_status(state: &str, is_complete: Option<bool>) -> IssueStatus {
    match is_complete {
        Some(true) => IssueStatus::Closed,
        Some(false) => IssueStatus::Open,
        None => {
            let state = state.trim().to_lowercase();
            if LAUNCHPAD_CLOSED.contains(&state.as_str()) {
                IssueStatus::Closed
            } else {
                IssueStatus::Open
            }
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
