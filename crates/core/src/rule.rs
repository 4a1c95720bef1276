// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Attachment rules and their match predicates.
//!
//! Criteria are stored as plain value sets where an empty set is a wildcard.
//! [`RuleCriteria::predicates`] turns them into explicit [`Predicate`]s that
//! are evaluated in-process against a [`TestResultView`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::test_result::{Family, TestResultStatus, TestResultView};

/// Membership test over a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<T> {
    /// No constraint.
    Always,
    /// The attribute must be one of these values.
    OneOf(BTreeSet<T>),
}

impl<T: Ord + Clone> Predicate<T> {
    /// Build a predicate from a value set; empty means [`Predicate::Always`].
    pub fn from_set(values: &BTreeSet<T>) -> Self {
        if values.is_empty() {
            Predicate::Always
        } else {
            Predicate::OneOf(values.clone())
        }
    }
}

impl<T: Ord> Predicate<T> {
    pub fn matches<Q>(&self, value: &Q) -> bool
    where
        T: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self {
            Predicate::Always => true,
            Predicate::OneOf(set) => set.contains(value),
        }
    }

    /// Like [`Predicate::matches`] for an optional attribute; a missing value
    /// only satisfies [`Predicate::Always`].
    pub fn matches_opt<Q>(&self, value: Option<&Q>) -> bool
    where
        T: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match (self, value) {
            (Predicate::Always, _) => true,
            (Predicate::OneOf(set), Some(v)) => set.contains(v),
            (Predicate::OneOf(_), None) => false,
        }
    }
}

/// Requirement over execution metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataPredicate {
    Always,
    /// Every category must have at least one tagged value in its set.
    AllCategories(BTreeMap<String, BTreeSet<String>>),
}

impl MetadataPredicate {
    pub fn from_map(required: &BTreeMap<String, BTreeSet<String>>) -> Self {
        if required.is_empty() {
            MetadataPredicate::Always
        } else {
            MetadataPredicate::AllCategories(required.clone())
        }
    }

    pub fn matches(&self, view: &TestResultView) -> bool {
        match self {
            MetadataPredicate::Always => true,
            MetadataPredicate::AllCategories(required) => {
                required.iter().all(|(category, accepted)| {
                    view.metadata
                        .iter()
                        .any(|m| &m.category == category && accepted.contains(&m.value))
                })
            }
        }
    }
}

/// Compiled form of [`RuleCriteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePredicates {
    pub family: Predicate<Family>,
    pub environment_name: Predicate<String>,
    pub test_case_name: Predicate<String>,
    pub template_id: Predicate<String>,
    pub status: Predicate<TestResultStatus>,
    pub metadata: MetadataPredicate,
}

impl RulePredicates {
    /// True if every predicate accepts the view.
    pub fn matches(&self, view: &TestResultView) -> bool {
        self.family.matches(&view.family)
            && self.environment_name.matches(view.environment_name.as_str())
            && self.test_case_name.matches(view.test_case_name.as_str())
            && self.template_id.matches_opt(view.template_id.as_deref())
            && self.status.matches(&view.status)
            && self.metadata.matches(view)
    }
}

/// Match criteria of an attachment rule. Empty sets are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCriteria {
    #[serde(default)]
    pub families: BTreeSet<Family>,
    #[serde(default)]
    pub environment_names: BTreeSet<String>,
    #[serde(default)]
    pub test_case_names: BTreeSet<String>,
    #[serde(default)]
    pub template_ids: BTreeSet<String>,
    #[serde(default)]
    pub test_result_statuses: BTreeSet<TestResultStatus>,
    #[serde(default)]
    pub execution_metadata: BTreeMap<String, BTreeSet<String>>,
}

impl RuleCriteria {
    /// True if the criteria impose no constraint at all.
    pub fn is_wildcard(&self) -> bool {
        self.families.is_empty()
            && self.environment_names.is_empty()
            && self.test_case_names.is_empty()
            && self.template_ids.is_empty()
            && self.test_result_statuses.is_empty()
            && self.execution_metadata.is_empty()
    }

    /// Reject blank names, blank metadata categories or values, and
    /// categories with no accepted values.
    pub fn validate(&self) -> Result<()> {
        check_values("environment name", &self.environment_names)?;
        check_values("test case name", &self.test_case_names)?;
        check_values("template id", &self.template_ids)?;
        for (category, values) in &self.execution_metadata {
            if category.trim().is_empty() {
                return Err(Error::Validation(
                    "metadata category cannot be empty".to_string(),
                ));
            }
            if values.is_empty() {
                return Err(Error::Validation(format!(
                    "metadata category '{category}' needs at least one value"
                )));
            }
            check_values("metadata value", values)?;
        }
        Ok(())
    }

    pub fn predicates(&self) -> RulePredicates {
        RulePredicates {
            family: Predicate::from_set(&self.families),
            environment_name: Predicate::from_set(&self.environment_names),
            test_case_name: Predicate::from_set(&self.test_case_names),
            template_id: Predicate::from_set(&self.template_ids),
            status: Predicate::from_set(&self.test_result_statuses),
            metadata: MetadataPredicate::from_map(&self.execution_metadata),
        }
    }
}

fn check_values(what: &str, values: &BTreeSet<String>) -> Result<()> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(Error::Validation(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// A standing policy linking an issue to matching test results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRule {
    pub id: i64,
    pub issue_id: i64,
    pub enabled: bool,
    pub criteria: RuleCriteria,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
