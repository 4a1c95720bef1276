// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use triage_core::{Database, RerunKey};

use crate::cli::OutputFormat;
use crate::display::format_rerun_line;
use crate::error::Result;

use super::{print_json, Context};

pub fn list(ctx: &Context, format: OutputFormat) -> Result<()> {
    let db = ctx.open_db()?;
    list_impl(&db, format)
}

pub(crate) fn list_impl(db: &Database, format: OutputFormat) -> Result<()> {
    let requests = db.list_rerun_requests()?;
    match format {
        OutputFormat::Json => {
            for request in &requests {
                print_json(request)?;
            }
        }
        OutputFormat::Text => {
            if requests.is_empty() {
                println!("No rerun requests");
            }
            for request in &requests {
                println!("{}", format_rerun_line(request));
            }
        }
    }
    Ok(())
}

/// Consume the pending request for one slice, as a rerun scheduler would.
pub fn delete(ctx: &Context, key: RerunKey) -> Result<()> {
    let db = ctx.open_db()?;
    delete_impl(&db, key)
}

pub(crate) fn delete_impl(db: &Database, key: RerunKey) -> Result<()> {
    let removed = db.delete_rerun_requests(&[key])?;
    println!("Deleted {removed} rerun request(s)");
    Ok(())
}

#[cfg(test)]
#[path = "rerun_tests.rs"]
mod tests;
