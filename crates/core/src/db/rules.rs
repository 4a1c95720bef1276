// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::rule::{AttachmentRule, RuleCriteria};

use super::{parse_db, parse_timestamp, Database};

const KIND_FAMILY: &str = "family";
const KIND_ENVIRONMENT: &str = "environment";
const KIND_TEST_CASE: &str = "test_case";
const KIND_TEMPLATE: &str = "template";
const KIND_STATUS: &str = "status";

fn row_to_rule(row: &Row) -> rusqlite::Result<AttachmentRule> {
    let created_str: String = row.get(3)?;
    Ok(AttachmentRule {
        id: row.get(0)?,
        issue_id: row.get(1)?,
        enabled: row.get(2)?,
        criteria: RuleCriteria::default(),
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

impl Database {
    /// Create a rule for an existing issue.
    pub fn create_rule(
        &self,
        issue_id: i64,
        criteria: &RuleCriteria,
        enabled: bool,
    ) -> Result<AttachmentRule> {
        criteria.validate()?;
        if !self.issue_exists(issue_id)? {
            return Err(Error::IssueNotFound(issue_id));
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO attachment_rules (issue_id, enabled, created_at) VALUES (?1, ?2, ?3)",
            params![issue_id, enabled, Utc::now().to_rfc3339()],
        )?;
        let rule_id = tx.last_insert_rowid();

        let lists: [(&str, Vec<&str>); 5] = [
            (
                KIND_FAMILY,
                criteria.families.iter().map(|f| f.as_str()).collect(),
            ),
            (
                KIND_ENVIRONMENT,
                criteria.environment_names.iter().map(String::as_str).collect(),
            ),
            (
                KIND_TEST_CASE,
                criteria.test_case_names.iter().map(String::as_str).collect(),
            ),
            (
                KIND_TEMPLATE,
                criteria.template_ids.iter().map(String::as_str).collect(),
            ),
            (
                KIND_STATUS,
                criteria
                    .test_result_statuses
                    .iter()
                    .map(|s| s.as_str())
                    .collect(),
            ),
        ];
        for (kind, values) in lists {
            for value in values {
                tx.execute(
                    "INSERT OR IGNORE INTO rule_criteria (rule_id, kind, value) VALUES (?1, ?2, ?3)",
                    params![rule_id, kind, value],
                )?;
            }
        }
        for (category, values) in &criteria.execution_metadata {
            for value in values {
                tx.execute(
                    "INSERT OR IGNORE INTO rule_metadata (rule_id, category, value) VALUES (?1, ?2, ?3)",
                    params![rule_id, category, value],
                )?;
            }
        }
        tx.commit()?;

        tracing::debug!("created attachment rule {} for issue {}", rule_id, issue_id);
        self.get_rule(rule_id)
    }

    /// Get a rule with its criteria.
    pub fn get_rule(&self, id: i64) -> Result<AttachmentRule> {
        let rule = self
            .conn
            .query_row(
                "SELECT id, issue_id, enabled, created_at FROM attachment_rules WHERE id = ?1",
                params![id],
                row_to_rule,
            )
            .optional()?;

        let mut rule = rule.ok_or(Error::RuleNotFound(id))?;
        rule.criteria = self.load_criteria(id)?;
        Ok(rule)
    }

    /// List rules in creation order, optionally only those of one issue.
    pub fn list_rules(&self, issue_id: Option<i64>) -> Result<Vec<AttachmentRule>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, enabled, created_at FROM attachment_rules
             WHERE ?1 IS NULL OR issue_id = ?1
             ORDER BY created_at, id",
        )?;
        let rules = stmt
            .query_map(params![issue_id], row_to_rule)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.with_criteria(rules)
    }

    /// Enabled rules in creation order.
    pub fn enabled_rules(&self) -> Result<Vec<AttachmentRule>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, enabled, created_at FROM attachment_rules
             WHERE enabled = 1
             ORDER BY created_at, id",
        )?;
        let rules = stmt
            .query_map([], row_to_rule)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.with_criteria(rules)
    }

    /// Enable or disable a rule. Criteria cannot be edited in place.
    pub fn set_rule_enabled(&self, id: i64, enabled: bool) -> Result<AttachmentRule> {
        self.conn.execute(
            "UPDATE attachment_rules SET enabled = ?1 WHERE id = ?2",
            params![enabled, id],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::RuleNotFound(id));
        }
        self.get_rule(id)
    }

    /// Delete a rule of the given issue.
    ///
    /// Attachments it produced survive with no rule reference.
    pub fn delete_rule(&self, issue_id: i64, rule_id: i64) -> Result<()> {
        if !self.issue_exists(issue_id)? {
            return Err(Error::IssueNotFound(issue_id));
        }
        let rule = self.get_rule(rule_id)?;
        if rule.issue_id != issue_id {
            return Err(Error::Validation(format!(
                "rule {rule_id} is not attached to issue {issue_id}"
            )));
        }
        self.conn.execute(
            "DELETE FROM attachment_rules WHERE id = ?1",
            params![rule_id],
        )?;
        Ok(())
    }

    /// Delete rules whose owning issue no longer exists. Returns how many.
    pub fn prune_orphaned_rules(&self) -> Result<usize> {
        let removed = self.conn.execute(
            "DELETE FROM attachment_rules WHERE issue_id NOT IN (SELECT id FROM issues)",
            [],
        )?;
        if removed > 0 {
            tracing::info!("pruned {} orphaned attachment rules", removed);
        }
        Ok(removed)
    }

    fn with_criteria(&self, mut rules: Vec<AttachmentRule>) -> Result<Vec<AttachmentRule>> {
        for rule in &mut rules {
            rule.criteria = self.load_criteria(rule.id)?;
        }
        Ok(rules)
    }

    fn load_criteria(&self, rule_id: i64) -> Result<RuleCriteria> {
        let mut criteria = RuleCriteria::default();

        let mut stmt = self
            .conn
            .prepare("SELECT kind, value FROM rule_criteria WHERE rule_id = ?1")?;
        let rows = stmt
            .query_map(params![rule_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for (kind, value) in rows {
            match kind.as_str() {
                KIND_FAMILY => {
                    criteria.families.insert(parse_db(&value, "rule_criteria.value")?);
                }
                KIND_ENVIRONMENT => {
                    criteria.environment_names.insert(value);
                }
                KIND_TEST_CASE => {
                    criteria.test_case_names.insert(value);
                }
                KIND_TEMPLATE => {
                    criteria.template_ids.insert(value);
                }
                KIND_STATUS => {
                    criteria
                        .test_result_statuses
                        .insert(parse_db(&value, "rule_criteria.value")?);
                }
                other => {
                    return Err(Error::CorruptedData(format!(
                        "unknown rule criteria kind '{other}'"
                    )))
                }
            }
        }

        let mut stmt = self
            .conn
            .prepare("SELECT category, value FROM rule_metadata WHERE rule_id = ?1")?;
        let rows = stmt
            .query_map(params![rule_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        for (category, value) in rows {
            criteria
                .execution_metadata
                .entry(category)
                .or_default()
                .insert(value);
        }

        Ok(criteria)
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
