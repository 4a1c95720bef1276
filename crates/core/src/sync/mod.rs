// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Prioritized synchronization of mirrored issues with their trackers.
//!
//! ```text
//! ┌──────────────┐   due issues   ┌──────────────┐  route  ┌──────────────┐
//! │ SyncStrategy │──────────────►│ SyncService  │───────►│ Synchronizer │
//! └──────────────┘                └──────────────┘         └──────┬───────┘
//!                                        │ commit per issue       │ get_issue
//!                                        ▼                        ▼
//!                                 ┌──────────────┐         ┌──────────────┐
//!                                 │   Database   │         │ IssueClient  │
//!                                 └──────────────┘         └──────────────┘
//! ```

mod backends;
mod client;
mod registry;
mod service;
mod status;
mod strategy;
mod synchronizer;

pub use backends::{GithubSynchronizer, JiraSynchronizer, LaunchpadSynchronizer};
pub use client::{ClientError, IssueClient, IssueData};
pub use registry::SynchronizerRegistry;
pub use service::{BatchResult, SyncService};
pub use status::{github_status, jira_status, launchpad_status};
pub use strategy::{SyncIntervals, SyncPriority, SyncStats, SyncStrategy};
pub use synchronizer::{apply_issue_data, SyncResult, Synchronizer};

#[cfg(test)]
mod test_helpers;
