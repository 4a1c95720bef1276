// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{OutputArgs, OutputFormat, TargetArgs, Toggle};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "triage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Attach tracker issues to test results and keep them in sync")]
#[command(
    long_about = "Attach tracker issues to test results and keep them in sync.\n\n\
    Attachment rules link GitHub, Jira and Launchpad issues to matching test\n\
    results as they are ingested; the sync scheduler refreshes mirrored issues\n\
    from their trackers, most urgent first."
)]
pub struct Cli {
    /// Config file (default: $TRIAGE_CONFIG or the user config directory)
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Database file (default: $TRIAGE_DB, config `database`, or the user data directory)
    #[arg(long, global = true, value_name = "path")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the database and write a default config file
    Init,

    /// Manage mirrored tracker issues
    #[command(subcommand)]
    Issue(IssueCommand),

    /// Manage attachment rules
    #[command(subcommand)]
    Rule(RuleCommand),

    /// Record test results and attach issues by rule
    #[command(after_help = "\
Input is JSON: one test result object, an array of them, or one per line.

Examples:
  triage ingest results.json      Ingest results from a file
  cat results.jsonl | triage ingest -o json")]
    Ingest {
        /// File to read, or '-' for stdin
        #[arg(default_value = "-")]
        file: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Apply enabled rules to already recorded test results
    #[command(arg_required_else_help = true)]
    Backfill {
        /// Test result id(s)
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<i64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Attach an issue to test results by hand
    #[command(after_help = "\
Examples:
  triage attach 3 --result 17,18          Attach issue 3 to two results
  triage attach 3 -f family=snap -f status=failed --rule 5")]
    Attach {
        /// Issue id
        issue_id: i64,

        #[command(flatten)]
        target: TargetArgs,

        /// Record this rule as the attachment's provenance
        #[arg(long, value_name = "RULE_ID")]
        rule: Option<i64>,
    },

    /// Detach an issue from test results
    Detach {
        /// Issue id
        issue_id: i64,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Inspect and clear pending rerun requests
    #[command(subcommand)]
    Rerun(RerunCommand),

    /// Synchronize mirrored issues with their trackers
    #[command(subcommand)]
    Sync(SyncCommand),
}

#[derive(Subcommand)]
pub enum IssueCommand {
    /// Mirror an issue by URL (idempotent)
    #[command(after_help = "\
Examples:
  triage issue add https://github.com/canonical/checkbox/issues/12
  triage issue add https://warthogs.atlassian.net/browse/TO-142 --auto-rerun
  triage issue add https://bugs.launchpad.net/ubuntu/+bug/2045678")]
    Add {
        /// GitHub, Jira or Launchpad issue URL
        #[arg(value_parser = non_empty_string)]
        url: String,

        /// Initial title, until the first sync
        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        /// Request reruns when rules attach this issue
        #[arg(long)]
        auto_rerun: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List mirrored issues
    List {
        /// Filter by status (open, closed, unknown)
        #[arg(long, short)]
        status: Option<String>,

        /// Filter by source (github, jira, launchpad)
        #[arg(long)]
        source: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show an issue with its rules and attachments
    Show {
        id: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Edit an issue's title or status
    Edit {
        id: i64,

        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        /// New status (open, closed, unknown)
        #[arg(long)]
        status: Option<String>,
    },

    /// Turn rule-driven rerun requests on or off for an issue
    AutoRerun {
        id: i64,

        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Subcommand)]
pub enum RuleCommand {
    /// Create an attachment rule for an issue
    #[command(after_help = "\
Terms are field=value[,value...]. Values within a term are alternatives;
different fields must all match. A rule without terms matches every result.

Fields: family, environment, test_case, template, status, meta:<category>

Examples:
  triage rule add 3 -m family=snap -m status=failed
  triage rule add 3 -m test_case=camera/detect -m meta:arch=amd64,arm64")]
    Add {
        /// Issue id
        issue_id: i64,

        /// Match term field=value[,value...]
        #[arg(long = "match", short = 'm', value_name = "TERM")]
        terms: Vec<String>,

        /// Create the rule disabled
        #[arg(long)]
        disabled: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List rules
    List {
        /// Only rules for this issue
        #[arg(long)]
        issue: Option<i64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Enable a rule
    Enable { rule_id: i64 },

    /// Disable a rule
    Disable { rule_id: i64 },

    /// Delete a rule of an issue
    Delete { issue_id: i64, rule_id: i64 },

    /// Delete rules whose issue no longer exists
    Prune,
}

#[derive(Subcommand)]
pub enum RerunCommand {
    /// List pending rerun requests
    List {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Delete the rerun request for one test slice
    Delete {
        #[arg(long)]
        plan: i64,

        #[arg(long)]
        build: i64,

        #[arg(long)]
        environment: i64,
    },
}

#[derive(Subcommand)]
pub enum SyncCommand {
    /// Sync one batch of due issues at a priority tier
    #[command(after_help = "\
Tiers:
  high     open and unknown issues
  medium   issues closed recently
  low      issues closed long ago")]
    Run {
        /// Tier to sync (high, medium, low)
        #[arg(long, short, default_value = "high")]
        priority: String,

        /// Maximum issues to sync (default: config sync.batch_size)
        #[arg(long, short = 'n')]
        batch_size: Option<usize>,

        /// Query trackers concurrently
        #[arg(long)]
        parallel: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Sync every issue regardless of schedule
    All {
        #[arg(long)]
        parallel: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Sync one issue now
    Issue {
        id: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show issue counts per sync tier
    Stats {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
