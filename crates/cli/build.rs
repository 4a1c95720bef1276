// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let path = std::path::Path::new(&out_dir).join("env_vars.rs");
    let mut f = std::fs::File::create(path)?;

    let vars = [
        ("TRIAGE_CONFIG", "TRIAGE_CONFIG"),
        ("TRIAGE_DB", "TRIAGE_DB"),
        ("TRIAGE_GITHUB_TOKEN", "TRIAGE_GITHUB_TOKEN"),
        ("TRIAGE_JIRA_EMAIL", "TRIAGE_JIRA_EMAIL"),
        ("TRIAGE_JIRA_TOKEN", "TRIAGE_JIRA_TOKEN"),
        ("TRIAGE_LAUNCHPAD_CREDENTIALS", "TRIAGE_LAUNCHPAD_CREDENTIALS"),
    ];

    for (const_name, env_name) in &vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";")?;
    }

    Ok(())
}
