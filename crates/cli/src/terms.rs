// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parser for `field=value[,value...]` terms.
//!
//! Terms build rule criteria (`triage rule add --match`) and bulk filters
//! (`triage attach --filter`). Repeating a field adds values to it; values
//! within a field are alternatives, distinct fields must all match.
//!
//! | Field                      | Meaning                              |
//! |----------------------------|--------------------------------------|
//! | `family`                   | snap, deb, charm, image              |
//! | `environment`, `env`       | environment name                     |
//! | `test_case`, `case`        | test case name                       |
//! | `template`                 | template id                          |
//! | `status`                   | passed, failed, skipped              |
//! | `meta:<category>`          | execution metadata value             |
//! | `plan`, `build`            | test plan / artefact build id (filters only) |

use std::collections::BTreeSet;

use triage_core::test_result::{Family, TestResultStatus};
use triage_core::{RuleCriteria, TestResultFilter};

use crate::error::{Error, Result};

const META_PREFIX: &str = "meta:";

/// Parse terms into rule criteria. Plan and build fields are rejected.
pub fn parse_criteria(terms: &[String]) -> Result<RuleCriteria> {
    let mut criteria = RuleCriteria::default();
    for term in terms {
        let (field, values) = split_term(term)?;
        if !apply_criterion(&mut criteria, field, &values, term)? {
            return Err(Error::UnknownField(field.to_string(), ""));
        }
    }
    Ok(criteria)
}

/// Parse terms into a bulk filter.
pub fn parse_filter(terms: &[String]) -> Result<TestResultFilter> {
    let mut filter = TestResultFilter::default();
    for term in terms {
        let (field, values) = split_term(term)?;
        match field {
            "plan" => filter.test_plan_ids.extend(parse_ids(&values, term)?),
            "build" => filter.artefact_build_ids.extend(parse_ids(&values, term)?),
            _ => {
                if !apply_criterion(&mut filter.criteria, field, &values, term)? {
                    return Err(Error::UnknownField(field.to_string(), ", plan, build"));
                }
            }
        }
    }
    Ok(filter)
}

fn split_term(term: &str) -> Result<(&str, Vec<String>)> {
    let invalid = |reason: &str| Error::InvalidTerm {
        term: term.to_string(),
        reason: reason.to_string(),
    };
    let (field, raw) = term.split_once('=').ok_or_else(|| invalid("missing '='"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(invalid("missing field name"));
    }
    let values: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        return Err(invalid("no values"));
    }
    Ok((field, values))
}

/// Returns false if `field` is not a criteria field.
fn apply_criterion(
    criteria: &mut RuleCriteria,
    field: &str,
    values: &[String],
    term: &str,
) -> Result<bool> {
    match field {
        "family" => {
            for value in values {
                criteria.families.insert(value.parse::<Family>()?);
            }
        }
        "status" => {
            for value in values {
                criteria
                    .test_result_statuses
                    .insert(value.parse::<TestResultStatus>()?);
            }
        }
        "environment" | "env" => criteria.environment_names.extend(values.iter().cloned()),
        "test_case" | "case" => criteria.test_case_names.extend(values.iter().cloned()),
        "template" => criteria.template_ids.extend(values.iter().cloned()),
        _ => match field.strip_prefix(META_PREFIX) {
            Some(category) if !category.trim().is_empty() => {
                criteria
                    .execution_metadata
                    .entry(category.trim().to_string())
                    .or_default()
                    .extend(values.iter().cloned());
            }
            Some(_) => {
                return Err(Error::InvalidTerm {
                    term: term.to_string(),
                    reason: "missing metadata category".to_string(),
                })
            }
            None => return Ok(false),
        },
    }
    Ok(true)
}

fn parse_ids(values: &[String], term: &str) -> Result<BTreeSet<i64>> {
    values
        .iter()
        .map(|v| {
            v.parse::<i64>().map_err(|_| Error::InvalidTerm {
                term: term.to_string(),
                reason: format!("'{v}' is not a numeric id"),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "terms_tests.rs"]
mod tests;
