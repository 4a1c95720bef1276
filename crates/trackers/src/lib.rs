// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP clients for the external issue trackers.
//!
//! Each client implements [`triage_core::sync::IssueClient`] over a blocking
//! `reqwest` client and reports failures as [`ClientError`] classes that the
//! sync service records on the issue.

pub mod config;
pub mod github;
mod http;
pub mod jira;
pub mod launchpad;

pub use config::{GithubConfig, JiraConfig, LaunchpadConfig, TrackersConfig};
pub use github::GithubClient;
pub use jira::JiraClient;
pub use launchpad::{LaunchpadClient, LaunchpadCredentials};

pub use triage_core::sync::ClientError;
