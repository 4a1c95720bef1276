// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use triage_core::db::Attachment;
use triage_core::{AttachmentRule, Database, Issue, IssueIdentity, IssueSource, IssueStatus};

use crate::cli::OutputFormat;
use crate::display::{format_issue_details, format_issue_line};
use crate::error::Result;

use super::{emit, print_json, Context};

#[derive(Serialize)]
struct IssueDetails {
    #[serde(flatten)]
    issue: Issue,
    url: String,
    rules: Vec<AttachmentRule>,
    attachments: Vec<Attachment>,
}

pub fn add(
    ctx: &Context,
    url: &str,
    title: Option<&str>,
    auto_rerun: bool,
    format: OutputFormat,
) -> Result<()> {
    let db = ctx.open_db()?;
    add_impl(&db, url, title, auto_rerun, format)
}

/// Mirror an issue by URL. Adding a known URL returns the existing issue.
pub(crate) fn add_impl(
    db: &Database,
    url: &str,
    title: Option<&str>,
    auto_rerun: bool,
    format: OutputFormat,
) -> Result<()> {
    let identity = IssueIdentity::from_url(url)?;
    let (mut issue, created) = db.get_or_create_issue(&identity)?;
    if created {
        if let Some(title) = title {
            issue = db.edit_issue(issue.id, Some(title), None)?;
        }
    }
    if auto_rerun && !issue.auto_rerun_enabled {
        db.set_auto_rerun(issue.id, true)?;
        issue = db.get_issue(issue.id)?;
    }

    emit(format, &issue, |issue| {
        let verb = if created { "Created" } else { "Found existing" };
        vec![format!("{verb} issue {}: {}", issue.id, issue.url())]
    })
}

pub fn list(
    ctx: &Context,
    status: Option<&str>,
    source: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let db = ctx.open_db()?;
    list_impl(&db, status, source, format)
}

pub(crate) fn list_impl(
    db: &Database,
    status: Option<&str>,
    source: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let status = status.map(str::parse::<IssueStatus>).transpose()?;
    let source = source.map(str::parse::<IssueSource>).transpose()?;
    let issues = db.list_issues(status, source)?;

    match format {
        OutputFormat::Json => {
            for issue in &issues {
                print_json(issue)?;
            }
        }
        OutputFormat::Text => {
            if issues.is_empty() {
                println!("No issues");
            }
            for issue in &issues {
                println!("{}", format_issue_line(issue));
            }
        }
    }
    Ok(())
}

pub fn show(ctx: &Context, id: i64, format: OutputFormat) -> Result<()> {
    let db = ctx.open_db()?;
    show_impl(&db, id, format)
}

pub(crate) fn show_impl(db: &Database, id: i64, format: OutputFormat) -> Result<()> {
    let issue = db.get_issue(id)?;
    let details = IssueDetails {
        url: issue.url(),
        rules: db.list_rules(Some(id))?,
        attachments: db.attachments_for_issue(id)?,
        issue,
    };
    emit(format, &details, |d| {
        vec![format_issue_details(&d.issue, &d.rules, &d.attachments)]
    })
}

pub fn edit(ctx: &Context, id: i64, title: Option<&str>, status: Option<&str>) -> Result<()> {
    let db = ctx.open_db()?;
    edit_impl(&db, id, title, status)
}

pub(crate) fn edit_impl(
    db: &Database,
    id: i64,
    title: Option<&str>,
    status: Option<&str>,
) -> Result<()> {
    if title.is_none() && status.is_none() {
        return Err(triage_core::Error::Validation(
            "nothing to edit: pass --title and/or --status".to_string(),
        )
        .into());
    }
    let status = status.map(str::parse::<IssueStatus>).transpose()?;
    let issue = db.edit_issue(id, title, status)?;
    println!("Updated issue {}", issue.id);
    Ok(())
}

pub fn auto_rerun(ctx: &Context, id: i64, enabled: bool) -> Result<()> {
    let db = ctx.open_db()?;
    auto_rerun_impl(&db, id, enabled)
}

pub(crate) fn auto_rerun_impl(db: &Database, id: i64, enabled: bool) -> Result<()> {
    db.set_auto_rerun(id, enabled)?;
    println!(
        "Auto-rerun {} for issue {}",
        if enabled { "on" } else { "off" },
        id
    );
    Ok(())
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
