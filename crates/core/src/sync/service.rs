// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drives sync batches and commits their outcome.
//!
//! Every issue is committed in its own transaction as soon as its result is
//! known, so an interrupted batch leaves finished issues stamped and the rest
//! untouched. A failed sync stores its error and leaves `last_synced_at`
//! alone, which keeps the issue due for the next pass.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::mpsc;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::issue::Issue;

use super::registry::SynchronizerRegistry;
use super::strategy::{SyncPriority, SyncStats, SyncStrategy};
use super::synchronizer::SyncResult;

/// Aggregated outcome of one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchResult {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Successful syncs that changed title, status or labels.
    pub updated: usize,
    pub results: Vec<SyncResult>,
}

impl BatchResult {
    pub fn from_results(results: Vec<SyncResult>) -> Self {
        let mut batch = BatchResult {
            total: results.len(),
            ..Default::default()
        };
        for result in &results {
            if result.success {
                batch.successful += 1;
                if result.changed() {
                    batch.updated += 1;
                }
            } else {
                batch.failed += 1;
            }
        }
        batch.results = results;
        batch
    }

    /// Percentage of successful syncs; 0 for an empty batch.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.successful as f64 / self.total as f64 * 100.0
    }
}

pub struct SyncService {
    registry: SynchronizerRegistry,
    strategy: SyncStrategy,
}

impl SyncService {
    /// Fails if no synchronizer is registered.
    pub fn new(registry: SynchronizerRegistry, strategy: SyncStrategy) -> Result<Self> {
        if registry.is_empty() {
            return Err(Error::Validation(
                "at least one synchronizer is required".to_string(),
            ));
        }
        tracing::info!(
            "sync service using synchronizers: {}",
            registry.names().join(", ")
        );
        Ok(SyncService { registry, strategy })
    }

    pub fn strategy(&self) -> &SyncStrategy {
        &self.strategy
    }

    /// Scheduler entry point: sync one batch of due issues at `priority`.
    pub fn run(
        &self,
        db: &Database,
        priority: SyncPriority,
        batch_size: usize,
    ) -> Result<BatchResult> {
        self.run_at(db, priority, batch_size, Utc::now(), false)
    }

    /// Like [`SyncService::run`] with an explicit selection time and mode.
    pub fn run_at(
        &self,
        db: &Database,
        priority: SyncPriority,
        batch_size: usize,
        now: DateTime<Utc>,
        parallel: bool,
    ) -> Result<BatchResult> {
        let issues = db.list_issues(None, None)?;
        let due = self.strategy.select_due(&issues, batch_size, priority, now);
        let batch = if parallel {
            self.sync_batch_parallel(db, due)
        } else {
            self.sync_batch(db, due)
        };
        log_batch(priority.as_str(), &batch);
        Ok(batch)
    }

    /// Sync every stored issue regardless of staleness.
    pub fn sync_all(&self, db: &Database, parallel: bool) -> Result<BatchResult> {
        let issues = db.list_issues(None, None)?;
        tracing::info!("starting synchronization of {} issues", issues.len());
        let batch = if parallel {
            self.sync_batch_parallel(db, issues)
        } else {
            self.sync_batch(db, issues)
        };
        log_batch("all", &batch);
        Ok(batch)
    }

    /// Tier counts over all stored issues.
    pub fn stats(&self, db: &Database) -> Result<SyncStats> {
        let issues = db.list_issues(None, None)?;
        Ok(self.strategy.stats(&issues, Utc::now()))
    }

    /// Sync one issue by ID outside of a batch run.
    pub fn sync_issue(&self, db: &Database, issue_id: i64) -> Result<SyncResult> {
        let issue = db.get_issue(issue_id)?;
        Ok(self.sync_one(db, issue))
    }

    /// Sync issues one after another in the calling thread.
    pub fn sync_batch(&self, db: &Database, issues: Vec<Issue>) -> BatchResult {
        let results = issues
            .into_iter()
            .map(|issue| self.sync_one(db, issue))
            .collect();
        BatchResult::from_results(results)
    }

    /// Sync with one worker per backend, each with at most one call in
    /// flight. Results are committed by the calling thread as they arrive.
    pub fn sync_batch_parallel(&self, db: &Database, issues: Vec<Issue>) -> BatchResult {
        let mut groups: Vec<Vec<Issue>> = (0..self.registry.len()).map(|_| Vec::new()).collect();
        let mut results = Vec::new();

        for issue in issues {
            match self
                .registry
                .position(&issue)
                .and_then(|i| groups.get_mut(i))
            {
                Some(group) => group.push(issue),
                None => results.push(unsupported(&issue)),
            }
        }

        let (tx, rx) = mpsc::channel::<(Issue, SyncResult)>();
        std::thread::scope(|scope| {
            for (synchronizer, group) in self.registry.synchronizers().iter().zip(groups) {
                if group.is_empty() {
                    continue;
                }
                let tx = tx.clone();
                scope.spawn(move || {
                    for mut issue in group {
                        let result = synchronizer.sync_issue(&mut issue);
                        if tx.send((issue, result)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);

            for (issue, result) in rx {
                results.push(commit(db, &issue, result));
            }
        });

        BatchResult::from_results(results)
    }

    fn sync_one(&self, db: &Database, mut issue: Issue) -> SyncResult {
        match self.registry.find(&issue) {
            Some(synchronizer) => {
                tracing::debug!(
                    "using {} synchronizer for issue {}",
                    synchronizer.name(),
                    issue.id
                );
                let result = synchronizer.sync_issue(&mut issue);
                commit(db, &issue, result)
            }
            None => unsupported(&issue),
        }
    }
}

fn unsupported(issue: &Issue) -> SyncResult {
    let err = Error::UnsupportedSource(issue.url());
    tracing::warn!("issue {}: {}", issue.id, err);
    SyncResult::failure(issue.id, err.to_string())
}

/// Persist one sync outcome in its own transaction.
///
/// A storage failure turns the result into a failure; the batch continues.
fn commit(db: &Database, issue: &Issue, result: SyncResult) -> SyncResult {
    match try_commit(db, issue, &result, Utc::now()) {
        Ok(()) => result,
        Err(e) => {
            tracing::warn!("failed to store sync result for issue {}: {}", issue.id, e);
            SyncResult::failure(issue.id, format!("failed to store sync result: {e}"))
        }
    }
}

fn try_commit(
    db: &Database,
    issue: &Issue,
    result: &SyncResult,
    now: DateTime<Utc>,
) -> Result<()> {
    let tx = db.conn.unchecked_transaction()?;
    if result.success {
        if result.changed() {
            db.save_issue_fields(issue, now)?;
        }
        db.mark_synced(issue.id, now)?;
    } else {
        let error = result.error.as_deref().unwrap_or("unknown sync error");
        db.record_sync_error(issue.id, error)?;
    }
    tx.commit()?;
    Ok(())
}

fn log_batch(label: &str, batch: &BatchResult) {
    tracing::info!(
        "{} sync complete: {}/{} successful, {} updated, {} failed",
        label,
        batch.successful,
        batch.total,
        batch.updated,
        batch.failed
    );
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
