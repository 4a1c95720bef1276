// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Priority tiers and staleness selection.
//!
//! | Tier   | Issues                                   | Default interval |
//! |--------|------------------------------------------|------------------|
//! | high   | not closed                               | 1 hour           |
//! | medium | closed, updated within the last 30 days  | 6 hours          |
//! | low    | closed, updated before that              | 7 days           |
//!
//! An issue is due when it was never synced or its last successful sync is
//! older than its tier's interval.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::issue::{Issue, IssueStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPriority {
    High,
    Medium,
    Low,
}

impl SyncPriority {
    /// Returns the string representation used in configuration and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncPriority::High => "high",
            SyncPriority::Medium => "medium",
            SyncPriority::Low => "low",
        }
    }

    pub fn all() -> [SyncPriority; 3] {
        [SyncPriority::High, SyncPriority::Medium, SyncPriority::Low]
    }
}

impl fmt::Display for SyncPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SyncPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "high" => Ok(SyncPriority::High),
            "medium" => Ok(SyncPriority::Medium),
            "low" => Ok(SyncPriority::Low),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

fn default_open_interval() -> u64 {
    3600
}

fn default_recent_closed_interval() -> u64 {
    6 * 3600
}

fn default_old_closed_interval() -> u64 {
    7 * 24 * 3600
}

fn default_old_closed_threshold_days() -> u64 {
    30
}

/// Sync intervals per tier, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncIntervals {
    #[serde(default = "default_open_interval")]
    pub open_interval_secs: u64,
    #[serde(default = "default_recent_closed_interval")]
    pub recent_closed_interval_secs: u64,
    #[serde(default = "default_old_closed_interval")]
    pub old_closed_interval_secs: u64,
    /// Closed issues not updated for this many days drop to the low tier.
    #[serde(default = "default_old_closed_threshold_days")]
    pub old_closed_threshold_days: u64,
}

impl Default for SyncIntervals {
    fn default() -> Self {
        SyncIntervals {
            open_interval_secs: default_open_interval(),
            recent_closed_interval_secs: default_recent_closed_interval(),
            old_closed_interval_secs: default_old_closed_interval(),
            old_closed_threshold_days: default_old_closed_threshold_days(),
        }
    }
}

/// Intervals are capped so date arithmetic cannot overflow.
const MAX_INTERVAL_SECS: i64 = 100 * 365 * 24 * 3600;

fn secs(value: u64) -> Duration {
    Duration::seconds(
        i64::try_from(value)
            .unwrap_or(MAX_INTERVAL_SECS)
            .min(MAX_INTERVAL_SECS),
    )
}

/// Issue counts per tier, for observability only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub open: usize,
    pub recently_closed: usize,
    pub old_closed: usize,
    pub never_synced: usize,
    pub total: usize,
}

/// Stateless selection of issues due for a refresh.
#[derive(Debug, Clone, Default)]
pub struct SyncStrategy {
    intervals: SyncIntervals,
}

impl SyncStrategy {
    pub fn new(intervals: SyncIntervals) -> Self {
        SyncStrategy { intervals }
    }

    pub fn intervals(&self) -> &SyncIntervals {
        &self.intervals
    }

    pub fn interval(&self, priority: SyncPriority) -> Duration {
        match priority {
            SyncPriority::High => secs(self.intervals.open_interval_secs),
            SyncPriority::Medium => secs(self.intervals.recent_closed_interval_secs),
            SyncPriority::Low => secs(self.intervals.old_closed_interval_secs),
        }
    }

    /// The tier an issue belongs to at `now`.
    ///
    /// Issues whose status is still unknown are scheduled with open ones.
    /// A freshly created issue stays unknown until its first sync, so it must
    /// land in a tier that syncs it.
    pub fn tier(&self, issue: &Issue, now: DateTime<Utc>) -> SyncPriority {
        if issue.status != IssueStatus::Closed {
            return SyncPriority::High;
        }
        let threshold = now - secs(self.intervals.old_closed_threshold_days.saturating_mul(86_400));
        if issue.updated_at >= threshold {
            SyncPriority::Medium
        } else {
            SyncPriority::Low
        }
    }

    /// True if `issue` is in `priority`'s tier and stale.
    pub fn is_due(&self, issue: &Issue, priority: SyncPriority, now: DateTime<Utc>) -> bool {
        if self.tier(issue, now) != priority {
            return false;
        }
        match issue.last_synced_at {
            None => true,
            Some(at) => at < now - self.interval(priority),
        }
    }

    /// Up to `batch_size` due issues of one tier, never-synced first, then
    /// stalest first.
    pub fn select_due(
        &self,
        issues: &[Issue],
        batch_size: usize,
        priority: SyncPriority,
        now: DateTime<Utc>,
    ) -> Vec<Issue> {
        let mut due: Vec<&Issue> = issues
            .iter()
            .filter(|i| self.is_due(i, priority, now))
            .collect();
        // None sorts before Some, so never-synced issues come first
        due.sort_by_key(|i| (i.last_synced_at, i.id));

        let selected: Vec<Issue> = due.into_iter().take(batch_size).cloned().collect();
        tracing::info!(
            "found {} {} priority issues due for sync",
            selected.len(),
            priority
        );
        selected
    }

    pub fn stats(&self, issues: &[Issue], now: DateTime<Utc>) -> SyncStats {
        let mut stats = SyncStats {
            total: issues.len(),
            ..Default::default()
        };
        for issue in issues {
            match self.tier(issue, now) {
                SyncPriority::High => stats.open += 1,
                SyncPriority::Medium => stats.recently_closed += 1,
                SyncPriority::Low => stats.old_closed += 1,
            }
            if issue.never_synced() {
                stats.never_synced += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
