// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use triage_core::applier::{self, AttachTarget};
use triage_core::Database;

use crate::cli::TargetArgs;
use crate::error::{Error, Result};
use crate::terms::parse_filter;

use super::Context;

/// Explicit ids win; otherwise the filter terms. One of the two is required.
pub(crate) fn resolve_target(args: &TargetArgs) -> Result<AttachTarget> {
    if !args.results.is_empty() {
        return Ok(AttachTarget::Results(args.results.clone()));
    }
    if !args.filter.is_empty() {
        return Ok(AttachTarget::Filter(parse_filter(&args.filter)?));
    }
    Err(Error::NoTarget)
}

pub fn attach(ctx: &Context, issue_id: i64, target: &TargetArgs, rule: Option<i64>) -> Result<()> {
    let db = ctx.open_db()?;
    attach_impl(&db, issue_id, target, rule)
}

pub(crate) fn attach_impl(
    db: &Database,
    issue_id: i64,
    target: &TargetArgs,
    rule: Option<i64>,
) -> Result<()> {
    let target = resolve_target(target)?;
    let created = applier::attach(db, issue_id, &target, rule)?;
    if target.is_bulk() {
        tracing::info!("bulk attach of issue {} created {} link(s)", issue_id, created);
    }
    println!("Attached issue {issue_id} to {created} test result(s)");
    Ok(())
}

pub fn detach(ctx: &Context, issue_id: i64, target: &TargetArgs) -> Result<()> {
    let db = ctx.open_db()?;
    detach_impl(&db, issue_id, target)
}

pub(crate) fn detach_impl(db: &Database, issue_id: i64, target: &TargetArgs) -> Result<()> {
    let target = resolve_target(target)?;
    let removed = applier::detach(db, issue_id, &target)?;
    if target.is_bulk() {
        tracing::info!("bulk detach of issue {} removed {} link(s)", issue_id, removed);
    }
    println!("Detached issue {issue_id} from {removed} test result(s)");
    Ok(())
}

#[cfg(test)]
#[path = "attach_tests.rs"]
mod tests;
