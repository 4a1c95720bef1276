// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! triage - attach tracker issues to test results and keep them in sync.
//!
//! This crate provides the `triage` CLI on top of [`triage_core`] and
//! [`triage_trackers`].
//!
//! # Main Components
//!
//! - [`Cli`] - Command line definition
//! - [`Config`] - TOML configuration (database path, logging, sync tiers, trackers)
//! - [`Error`] - Error types for all commands
//!
//! # Paths
//!
//! The config file comes from `--config`, `$TRIAGE_CONFIG`, or
//! `<config dir>/triage/config.toml`. The database comes from `--db`,
//! `$TRIAGE_DB`, the config's `database` key, or `<data dir>/triage/triage.db`.

mod cli;
mod commands;
mod display;
mod env;
mod logging;
mod terms;
mod trackers;

pub mod config;
pub mod error;

pub use cli::{
    Cli, Command, IssueCommand, OutputFormat, RerunCommand, RuleCommand, SyncCommand, Toggle,
};
pub use config::Config;
pub use error::{Error, Result};

use triage_core::RerunKey;

use commands::Context;
use config::Overrides;

/// Resolve configuration and run one command.
pub fn run(cli: Cli) -> Result<()> {
    let (config_path, required) = config::config_path(cli.config)?;
    let mut config = Config::load(&config_path, required)?;
    config.apply_overrides(Overrides::from_env());
    logging::setup_logging(&config.log);

    let db_path = config.db_path(cli.db)?;
    tracing::debug!(
        "config {} database {}",
        config_path.display(),
        db_path.display()
    );
    let ctx = Context {
        config,
        config_path,
        db_path,
    };

    match cli.command {
        Command::Init => commands::init::run(&ctx),
        Command::Issue(cmd) => run_issue(&ctx, cmd),
        Command::Rule(cmd) => run_rule(&ctx, cmd),
        Command::Ingest { file, output } => commands::ingest::run(&ctx, &file, output.output),
        Command::Backfill { ids, output } => commands::ingest::backfill(&ctx, &ids, output.output),
        Command::Attach {
            issue_id,
            target,
            rule,
        } => commands::attach::attach(&ctx, issue_id, &target, rule),
        Command::Detach { issue_id, target } => commands::attach::detach(&ctx, issue_id, &target),
        Command::Rerun(cmd) => match cmd {
            RerunCommand::List { output } => commands::rerun::list(&ctx, output.output),
            RerunCommand::Delete {
                plan,
                build,
                environment,
            } => commands::rerun::delete(
                &ctx,
                RerunKey {
                    test_plan_id: plan,
                    artefact_build_id: build,
                    environment_id: environment,
                },
            ),
        },
        Command::Sync(cmd) => run_sync(&ctx, cmd),
    }
}

fn run_issue(ctx: &Context, cmd: IssueCommand) -> Result<()> {
    match cmd {
        IssueCommand::Add {
            url,
            title,
            auto_rerun,
            output,
        } => commands::issue::add(ctx, &url, title.as_deref(), auto_rerun, output.output),
        IssueCommand::List {
            status,
            source,
            output,
        } => commands::issue::list(ctx, status.as_deref(), source.as_deref(), output.output),
        IssueCommand::Show { id, output } => commands::issue::show(ctx, id, output.output),
        IssueCommand::Edit { id, title, status } => {
            commands::issue::edit(ctx, id, title.as_deref(), status.as_deref())
        }
        IssueCommand::AutoRerun { id, state } => {
            commands::issue::auto_rerun(ctx, id, state.enabled())
        }
    }
}

fn run_rule(ctx: &Context, cmd: RuleCommand) -> Result<()> {
    match cmd {
        RuleCommand::Add {
            issue_id,
            terms,
            disabled,
            output,
        } => commands::rule::add(ctx, issue_id, &terms, disabled, output.output),
        RuleCommand::List { issue, output } => commands::rule::list(ctx, issue, output.output),
        RuleCommand::Enable { rule_id } => commands::rule::set_enabled(ctx, rule_id, true),
        RuleCommand::Disable { rule_id } => commands::rule::set_enabled(ctx, rule_id, false),
        RuleCommand::Delete { issue_id, rule_id } => commands::rule::delete(ctx, issue_id, rule_id),
        RuleCommand::Prune => commands::rule::prune(ctx),
    }
}

fn run_sync(ctx: &Context, cmd: SyncCommand) -> Result<()> {
    match cmd {
        SyncCommand::Run {
            priority,
            batch_size,
            parallel,
            output,
        } => commands::sync::run(ctx, &priority, batch_size, parallel, output.output),
        SyncCommand::All { parallel, output } => commands::sync::all(ctx, parallel, output.output),
        SyncCommand::Issue { id, output } => commands::sync::issue(ctx, id, output.output),
        SyncCommand::Stats { output } => commands::sync::stats(ctx, output.output),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
