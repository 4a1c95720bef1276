// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! triage-core: issue triage automation for test results.
//!
//! Two cooperating parts share one SQLite database:
//!
//! - the attachment rule [`matcher`] and [`applier`], which link tracker
//!   issues to failing test results and request reruns;
//! - the [`sync`] scheduler, which keeps mirrored issue state current with
//!   GitHub, Jira and Launchpad.

pub mod applier;
pub mod db;
pub mod error;
pub mod filter;
pub mod issue;
pub mod matcher;
pub mod rule;
pub mod sync;
pub mod test_result;
pub mod url;

pub use applier::{AttachTarget, TriageOutcome};
pub use db::{Attachment, Database, RerunRequest};
pub use error::{Error, Result};
pub use filter::TestResultFilter;
pub use issue::{Issue, IssueIdentity, IssueSource, IssueStatus};
pub use matcher::RuleMatcher;
pub use rule::{AttachmentRule, RuleCriteria};
pub use test_result::{Family, MetadataEntry, RerunKey, TestResultStatus, TestResultView};
