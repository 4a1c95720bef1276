// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Evaluates attachment rules against one test result.

use crate::rule::{AttachmentRule, RulePredicates};
use crate::test_result::TestResultView;

/// A set of rules compiled once and matched against many results.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    rules: Vec<(AttachmentRule, RulePredicates)>,
}

impl RuleMatcher {
    /// Compile the enabled rules; disabled ones are dropped up front.
    pub fn new(rules: impl IntoIterator<Item = AttachmentRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter(|r| r.enabled)
            .map(|r| {
                let predicates = r.criteria.predicates();
                (r, predicates)
            })
            .collect();
        RuleMatcher { rules }
    }

    /// Rules that apply to `view`, in the order they were supplied.
    pub fn find_matching(&self, view: &TestResultView) -> Vec<&AttachmentRule> {
        self.rules
            .iter()
            .filter(|(_, p)| p.matches(view))
            .map(|(rule, _)| {
                tracing::debug!(
                    "rule {} (issue {}) matches test result {}",
                    rule.id,
                    rule.issue_id,
                    view.id
                );
                rule
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One-shot form of [`RuleMatcher::find_matching`].
pub fn find_matching_rules<'a>(
    rules: &'a [AttachmentRule],
    view: &TestResultView,
) -> Vec<&'a AttachmentRule> {
    rules
        .iter()
        .filter(|r| r.enabled && r.criteria.predicates().matches(view))
        .collect()
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
