// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use triage_core::Database;

use crate::config::Config;
use crate::error::Result;

use super::Context;

/// Create the database and, if missing, a default config file.
///
/// Safe to re-run: an existing config is left alone and an existing
/// database is only migrated.
pub fn run(ctx: &Context) -> Result<()> {
    if !ctx.config_path.exists() {
        // Defaults only: secrets from the environment are never written out.
        Config::default().save(&ctx.config_path)?;
        println!("Wrote default config to {}", ctx.config_path.display());
    }

    let existed = ctx.db_path.exists();
    let db = Database::open(&ctx.db_path)?;
    let pruned = db.prune_orphaned_rules()?;
    if pruned > 0 {
        println!("Pruned {pruned} orphaned rule(s)");
    }

    if existed {
        println!("Database already initialized at {}", ctx.db_path.display());
    } else {
        println!("Initialized triage database at {}", ctx.db_path.display());
    }
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
