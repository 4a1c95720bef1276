// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ad-hoc test result filters for bulk attach and detach.
//!
//! Uses the same vocabulary as attachment rules, plus plan and build ids.
//! Unlike a rule, an empty filter is never accepted: a bulk operation over
//! every test result is almost certainly a mistake.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::rule::{Predicate, RuleCriteria};
use crate::test_result::TestResultView;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResultFilter {
    #[serde(flatten)]
    pub criteria: RuleCriteria,
    #[serde(default)]
    pub test_plan_ids: BTreeSet<i64>,
    #[serde(default)]
    pub artefact_build_ids: BTreeSet<i64>,
}

impl TestResultFilter {
    pub fn is_empty(&self) -> bool {
        self.criteria.is_wildcard()
            && self.test_plan_ids.is_empty()
            && self.artefact_build_ids.is_empty()
    }

    /// Reject empty filters and malformed criteria.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::Validation(
                "filter cannot be empty for a bulk operation".to_string(),
            ));
        }
        self.criteria.validate()
    }

    pub fn matches(&self, view: &TestResultView) -> bool {
        Predicate::from_set(&self.test_plan_ids).matches(&view.test_plan_id)
            && Predicate::from_set(&self.artefact_build_ids).matches(&view.artefact_build_id)
            && self.criteria.predicates().matches(view)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
