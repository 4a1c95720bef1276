// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Writes attachments and rerun requests for matched rules.
//!
//! [`ingest`] is the entry point used when a test result is created: it
//! records the result, matches the enabled rules and applies them in one
//! transaction. [`backfill`] re-runs the same steps for a stored result.
//! Manual attach and detach live here too; they never request reruns.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::filter::TestResultFilter;
use crate::matcher::RuleMatcher;
use crate::rule::AttachmentRule;
use crate::test_result::{RerunKey, TestResultView};

/// What applying rules to one test result did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriageOutcome {
    pub test_result_id: i64,
    /// False if the test result had already been recorded.
    pub recorded: bool,
    pub matched_rules: Vec<i64>,
    /// Rule IDs skipped because their issue no longer exists.
    pub skipped_rules: Vec<i64>,
    pub attachments_created: usize,
    /// Set when a new rerun request was created by this call.
    pub rerun_requested: Option<RerunKey>,
}

/// Persist attachments for `rules` and request a rerun if any newly
/// attached issue opts in.
///
/// Does not open a transaction; callers decide the commit boundary.
pub fn apply_attachments(
    db: &Database,
    view: &TestResultView,
    rules: &[&AttachmentRule],
) -> Result<TriageOutcome> {
    let mut outcome = TriageOutcome {
        test_result_id: view.id,
        ..Default::default()
    };
    let mut newly_attached = BTreeSet::new();

    for rule in rules {
        outcome.matched_rules.push(rule.id);
        if !db.issue_exists(rule.issue_id)? {
            tracing::warn!(
                "skipping rule {}: issue {} no longer exists",
                rule.id,
                rule.issue_id
            );
            outcome.skipped_rules.push(rule.id);
            continue;
        }
        if db.insert_attachment(rule.issue_id, view.id, Some(rule.id))? {
            outcome.attachments_created += 1;
            newly_attached.insert(rule.issue_id);
        }
    }

    let mut wants_rerun = false;
    for issue_id in &newly_attached {
        if db.get_issue(*issue_id)?.auto_rerun_enabled {
            wants_rerun = true;
            break;
        }
    }
    if wants_rerun {
        let key = view.rerun_key();
        if db.request_rerun(key)? {
            tracing::info!(
                "requested rerun of plan {} build {} environment {} for test result {}",
                key.test_plan_id,
                key.artefact_build_id,
                key.environment_id,
                view.id
            );
            outcome.rerun_requested = Some(key);
        }
    }

    Ok(outcome)
}

/// Record a new test result and triage it, atomically.
///
/// Any failure rolls back the result together with its attachments.
pub fn ingest(db: &Database, view: &TestResultView) -> Result<TriageOutcome> {
    let tx = db.conn.unchecked_transaction()?;
    let recorded = db.record_test_result(view)?;
    let matcher = RuleMatcher::new(db.enabled_rules()?);
    let mut outcome = apply_attachments(db, view, &matcher.find_matching(view))?;
    outcome.recorded = recorded;
    tx.commit()?;

    tracing::debug!(
        "triaged test result {}: {} rules matched, {} attachments created",
        view.id,
        outcome.matched_rules.len(),
        outcome.attachments_created
    );
    Ok(outcome)
}

/// Re-apply the current rules to an already stored test result.
pub fn backfill(db: &Database, test_result_id: i64) -> Result<TriageOutcome> {
    let view = db.get_test_result(test_result_id)?;
    let tx = db.conn.unchecked_transaction()?;
    let matcher = RuleMatcher::new(db.enabled_rules()?);
    let outcome = apply_attachments(db, &view, &matcher.find_matching(&view))?;
    tx.commit()?;
    Ok(outcome)
}

/// The test results a manual attach or detach applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachTarget {
    Results(Vec<i64>),
    Filter(TestResultFilter),
}

impl AttachTarget {
    /// Bulk operations touch more than one explicitly named result.
    pub fn is_bulk(&self) -> bool {
        match self {
            AttachTarget::Results(ids) => ids.len() > 1,
            AttachTarget::Filter(_) => true,
        }
    }

    fn resolve(&self, db: &Database) -> Result<Vec<i64>> {
        match self {
            AttachTarget::Results(ids) => {
                if ids.is_empty() {
                    return Err(Error::Validation(
                        "no test results given".to_string(),
                    ));
                }
                for id in ids {
                    db.get_test_result(*id)?;
                }
                let unique: BTreeSet<i64> = ids.iter().copied().collect();
                Ok(unique.into_iter().collect())
            }
            AttachTarget::Filter(filter) => Ok(db
                .filter_test_results(filter)?
                .into_iter()
                .map(|v| v.id)
                .collect()),
        }
    }
}

/// Attach an issue to test results by hand. Returns the number of new links.
///
/// `rule_id`, when given, is recorded as provenance and must exist.
pub fn attach(
    db: &Database,
    issue_id: i64,
    target: &AttachTarget,
    rule_id: Option<i64>,
) -> Result<usize> {
    if !db.issue_exists(issue_id)? {
        return Err(Error::IssueNotFound(issue_id));
    }
    if let Some(rule_id) = rule_id {
        db.get_rule(rule_id)?;
    }
    let ids = target.resolve(db)?;

    let tx = db.conn.unchecked_transaction()?;
    let mut created = 0;
    for id in ids {
        if db.insert_attachment(issue_id, id, rule_id)? {
            created += 1;
        }
    }
    tx.commit()?;
    Ok(created)
}

/// Detach an issue from test results. Returns the number of links removed.
pub fn detach(db: &Database, issue_id: i64, target: &AttachTarget) -> Result<usize> {
    if !db.issue_exists(issue_id)? {
        return Err(Error::IssueNotFound(issue_id));
    }
    let ids = target.resolve(db)?;

    let tx = db.conn.unchecked_transaction()?;
    let mut removed = 0;
    for id in ids {
        if db.remove_attachment(issue_id, id)? {
            removed += 1;
        }
    }
    tx.commit()?;
    Ok(removed)
}

#[cfg(test)]
#[path = "applier_tests.rs"]
mod tests;
