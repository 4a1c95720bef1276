// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracker sync commands.
//!
//! Per-issue failures are reported in the batch summary and stored on the
//! issue; they do not make the command fail.

use chrono::Utc;
use triage_core::sync::{SyncPriority, SyncService, SyncStrategy};
use triage_core::Database;

use crate::cli::OutputFormat;
use crate::display::{format_batch, format_stats, format_sync_result};
use crate::error::Result;
use crate::trackers::build_registry;

use super::{emit, Context};

/// Build the sync service from the configured trackers and intervals.
pub(crate) fn service(ctx: &Context) -> Result<SyncService> {
    let registry = build_registry(&ctx.config.trackers);
    let strategy = SyncStrategy::new(ctx.config.sync.intervals.clone());
    Ok(SyncService::new(registry, strategy)?)
}

pub fn run(
    ctx: &Context,
    priority: &str,
    batch_size: Option<usize>,
    parallel: bool,
    format: OutputFormat,
) -> Result<()> {
    let priority: SyncPriority = priority.parse()?;
    let db = ctx.open_db()?;
    let service = service(ctx)?;
    let batch_size = batch_size.unwrap_or(ctx.config.sync.batch_size);
    run_impl(
        &db,
        &service,
        priority,
        batch_size,
        parallel || ctx.config.sync.parallel,
        format,
    )
}

pub(crate) fn run_impl(
    db: &Database,
    service: &SyncService,
    priority: SyncPriority,
    batch_size: usize,
    parallel: bool,
    format: OutputFormat,
) -> Result<()> {
    let batch = service.run_at(db, priority, batch_size, Utc::now(), parallel)?;
    emit(format, &batch, |b| format_batch(priority.as_str(), b))
}

pub fn all(ctx: &Context, parallel: bool, format: OutputFormat) -> Result<()> {
    let db = ctx.open_db()?;
    let service = service(ctx)?;
    all_impl(&db, &service, parallel || ctx.config.sync.parallel, format)
}

pub(crate) fn all_impl(
    db: &Database,
    service: &SyncService,
    parallel: bool,
    format: OutputFormat,
) -> Result<()> {
    let batch = service.sync_all(db, parallel)?;
    emit(format, &batch, |b| format_batch("all", b))
}

pub fn issue(ctx: &Context, id: i64, format: OutputFormat) -> Result<()> {
    let db = ctx.open_db()?;
    let service = service(ctx)?;
    issue_impl(&db, &service, id, format)
}

pub(crate) fn issue_impl(
    db: &Database,
    service: &SyncService,
    id: i64,
    format: OutputFormat,
) -> Result<()> {
    let result = service.sync_issue(db, id)?;
    emit(format, &result, |r| vec![format_sync_result(r)])
}

pub fn stats(ctx: &Context, format: OutputFormat) -> Result<()> {
    let db = ctx.open_db()?;
    let service = service(ctx)?;
    stats_impl(&db, &service, format)
}

pub(crate) fn stats_impl(db: &Database, service: &SyncService, format: OutputFormat) -> Result<()> {
    let stats = service.stats(db)?;
    emit(format, &stats, format_stats)
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
