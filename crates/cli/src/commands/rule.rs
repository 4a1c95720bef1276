// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use triage_core::Database;

use crate::cli::OutputFormat;
use crate::display::{format_criteria, format_rule_line};
use crate::error::Result;
use crate::terms::parse_criteria;

use super::{emit, print_json, Context};

pub fn add(
    ctx: &Context,
    issue_id: i64,
    terms: &[String],
    disabled: bool,
    format: OutputFormat,
) -> Result<()> {
    let db = ctx.open_db()?;
    add_impl(&db, issue_id, terms, disabled, format)
}

pub(crate) fn add_impl(
    db: &Database,
    issue_id: i64,
    terms: &[String],
    disabled: bool,
    format: OutputFormat,
) -> Result<()> {
    let criteria = parse_criteria(terms)?;
    let rule = db.create_rule(issue_id, &criteria, !disabled)?;
    emit(format, &rule, |rule| {
        vec![format!(
            "Created rule {} for issue {}: {}",
            rule.id,
            rule.issue_id,
            format_criteria(&rule.criteria)
        )]
    })
}

pub fn list(ctx: &Context, issue_id: Option<i64>, format: OutputFormat) -> Result<()> {
    let db = ctx.open_db()?;
    list_impl(&db, issue_id, format)
}

pub(crate) fn list_impl(db: &Database, issue_id: Option<i64>, format: OutputFormat) -> Result<()> {
    if let Some(id) = issue_id {
        // Distinguish "no rules" from "no such issue".
        db.get_issue(id)?;
    }
    let rules = db.list_rules(issue_id)?;
    match format {
        OutputFormat::Json => {
            for rule in &rules {
                print_json(rule)?;
            }
        }
        OutputFormat::Text => {
            if rules.is_empty() {
                println!("No rules");
            }
            for rule in &rules {
                println!("{}", format_rule_line(rule));
            }
        }
    }
    Ok(())
}

pub fn set_enabled(ctx: &Context, rule_id: i64, enabled: bool) -> Result<()> {
    let db = ctx.open_db()?;
    set_enabled_impl(&db, rule_id, enabled)
}

pub(crate) fn set_enabled_impl(db: &Database, rule_id: i64, enabled: bool) -> Result<()> {
    let rule = db.set_rule_enabled(rule_id, enabled)?;
    println!(
        "{} rule {}",
        if rule.enabled { "Enabled" } else { "Disabled" },
        rule.id
    );
    Ok(())
}

pub fn delete(ctx: &Context, issue_id: i64, rule_id: i64) -> Result<()> {
    let db = ctx.open_db()?;
    delete_impl(&db, issue_id, rule_id)
}

pub(crate) fn delete_impl(db: &Database, issue_id: i64, rule_id: i64) -> Result<()> {
    db.delete_rule(issue_id, rule_id)?;
    println!("Deleted rule {rule_id} of issue {issue_id}");
    Ok(())
}

pub fn prune(ctx: &Context) -> Result<()> {
    let db = ctx.open_db()?;
    let pruned = db.prune_orphaned_rules()?;
    println!("Pruned {pruned} orphaned rule(s)");
    Ok(())
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
