// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod attach;
pub mod ingest;
pub mod init;
pub mod issue;
pub mod rerun;
pub mod rule;
pub mod sync;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;

use serde::Serialize;
use triage_core::Database;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{Error, Result};

/// Resolved configuration and paths shared by every command.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub db_path: PathBuf,
}

impl Context {
    /// Open the database, which must have been created by `triage init`.
    pub fn open_db(&self) -> Result<Database> {
        if !self.db_path.exists() {
            return Err(Error::NotInitialized(self.db_path.display().to_string()));
        }
        Ok(Database::open(&self.db_path)?)
    }
}

/// Print one JSON document per line.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    // Use to_string (not to_string_pretty) for JSONL format
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Print `value` as JSON, or its text lines.
pub(crate) fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> Vec<String>,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Text => {
            for line in text(value) {
                println!("{line}");
            }
            Ok(())
        }
    }
}
