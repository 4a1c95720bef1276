// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Read;

use triage_core::applier;
use triage_core::{Database, TestResultView};

use crate::cli::OutputFormat;
use crate::display::format_outcome;
use crate::error::Result;

use super::{emit, Context};

pub fn run(ctx: &Context, file: &str, format: OutputFormat) -> Result<()> {
    let input = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };
    let views = parse_views(&input)?;
    let db = ctx.open_db()?;
    run_impl(&db, &views, format)
}

/// Accepts a single object, an array, or a stream of objects (JSON lines).
pub(crate) fn parse_views(input: &str) -> Result<Vec<TestResultView>> {
    let mut views = Vec::new();
    for value in serde_json::Deserializer::from_str(input).into_iter::<serde_json::Value>() {
        match value? {
            serde_json::Value::Array(items) => {
                for item in items {
                    views.push(serde_json::from_value(item)?);
                }
            }
            other => views.push(serde_json::from_value(other)?),
        }
    }
    Ok(views)
}

/// Ingest each view in its own transaction, stopping at the first error.
pub(crate) fn run_impl(db: &Database, views: &[TestResultView], format: OutputFormat) -> Result<()> {
    for view in views {
        let outcome = applier::ingest(db, view)?;
        emit(format, &outcome, format_outcome)?;
    }
    Ok(())
}

pub fn backfill(ctx: &Context, ids: &[i64], format: OutputFormat) -> Result<()> {
    let db = ctx.open_db()?;
    backfill_impl(&db, ids, format)
}

pub(crate) fn backfill_impl(db: &Database, ids: &[i64], format: OutputFormat) -> Result<()> {
    for id in ids {
        let outcome = applier::backfill(db, *id)?;
        emit(format, &outcome, format_outcome)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;
