// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` to reduce duplication
//! across commands that share common argument patterns.

use clap::{Args, ValueEnum};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON document per line.
    Json,
}

#[derive(Args, Clone, Copy, Debug, Default)]
pub struct OutputArgs {
    /// Output format (text, json)
    #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Test results selected by id or by filter terms.
#[derive(Args, Clone, Debug, Default)]
pub struct TargetArgs {
    /// Test result id(s) (comma-separated or repeated)
    #[arg(long = "result", short = 'r', value_delimiter = ',', value_name = "ID")]
    pub results: Vec<i64>,

    /// Filter term field=value[,value...] (repeat to combine fields)
    #[arg(
        long = "filter",
        short = 'f',
        value_name = "TERM",
        conflicts_with = "results"
    )]
    pub filter: Vec<String>,
}

/// On/off switch for toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}
