// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized test results as seen by the matcher.
//!
//! A [`TestResultView`] flattens a test result together with its execution,
//! artefact build, artefact family, environment and execution metadata. The
//! ingestion path supplies it fully hydrated; the matcher never re-reads any
//! of these from storage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Artefact family a test execution ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Snap,
    Deb,
    Charm,
    Image,
}

impl Family {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Snap => "snap",
            Family::Deb => "deb",
            Family::Charm => "charm",
            Family::Image => "image",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "snap" => Ok(Family::Snap),
            "deb" => Ok(Family::Deb),
            "charm" => Ok(Family::Charm),
            "image" => Ok(Family::Image),
            _ => Err(Error::InvalidFamily(s.to_string())),
        }
    }
}

/// Outcome of one test case within an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestResultStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestResultStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestResultStatus::Passed => "PASSED",
            TestResultStatus::Failed => "FAILED",
            TestResultStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for TestResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TestResultStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "passed" => Ok(TestResultStatus::Passed),
            "failed" => Ok(TestResultStatus::Failed),
            "skipped" => Ok(TestResultStatus::Skipped),
            _ => Err(Error::InvalidResultStatus(s.to_string())),
        }
    }
}

/// One `(category, value)` tag on a test execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub category: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        MetadataEntry {
            category: category.into(),
            value: value.into(),
        }
    }
}

/// The test slice a rerun request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RerunKey {
    pub test_plan_id: i64,
    pub artefact_build_id: i64,
    pub environment_id: i64,
}

/// A test result joined with everything the matcher needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResultView {
    pub id: i64,
    pub test_execution_id: i64,
    pub test_plan_id: i64,
    pub artefact_build_id: i64,
    pub environment_id: i64,
    pub environment_name: String,
    pub family: Family,
    pub test_case_name: String,
    #[serde(default)]
    pub template_id: Option<String>,
    pub status: TestResultStatus,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl TestResultView {
    /// The slice a rerun request for this result would target.
    pub fn rerun_key(&self) -> RerunKey {
        RerunKey {
            test_plan_id: self.test_plan_id,
            artefact_build_id: self.artefact_build_id,
            environment_id: self.environment_id,
        }
    }

    /// Values tagged under `category` on this result's execution.
    pub fn metadata_values(&self, category: &str) -> BTreeSet<&str> {
        self.metadata
            .iter()
            .filter(|m| m.category == category)
            .map(|m| m.value.as_str())
            .collect()
    }
}

#[cfg(test)]
#[path = "test_result_tests.rs"]
mod tests;
