// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration.
//!
//! Configuration is stored as TOML, by default in the user config directory
//! (`~/.config/triage/config.toml` on Linux), and includes:
//! - `database`: Optional path to the SQLite database
//! - `[log]`: Default log level and optional log file
//! - `[sync]`: Tier intervals, batch size and parallel mode
//! - `[trackers.*]`: Per-tracker endpoints and credentials
//!
//! Secrets may instead come from the environment, which always wins.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use triage_core::sync::SyncIntervals;
use triage_trackers::TrackersConfig;

use crate::env;
use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "triage";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "triage.db";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database path; relative paths resolve against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub trackers: TrackersConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append logs here instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(flatten)]
    pub intervals: SyncIntervals,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub parallel: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_batch_size() -> usize {
    50
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            intervals: SyncIntervals::default(),
            batch_size: default_batch_size(),
            parallel: false,
        }
    }
}

/// Environment values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub github_token: Option<String>,
    pub jira_email: Option<String>,
    pub jira_token: Option<String>,
    pub launchpad_credentials: Option<PathBuf>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Overrides {
            github_token: env::github_token(),
            jira_email: env::jira_email(),
            jira_token: env::jira_token(),
            launchpad_credentials: env::launchpad_credentials(),
        }
    }
}

impl Config {
    /// Parse TOML content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidConfig {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    ///
    /// An explicitly requested path must exist.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() {
            if required {
                return Err(Error::ConfigNotFound(path.display().to_string()));
            }
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let mut config = Config::parse(&content, path)?;
        if let (Some(db), Some(dir)) = (&config.database, path.parent()) {
            if db.is_relative() {
                config.database = Some(dir.join(db));
            }
        }
        Ok(config)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(token) = overrides.github_token {
            self.trackers.github.token = Some(token);
        }
        if let Some(email) = overrides.jira_email {
            self.trackers.jira.email = Some(email);
        }
        if let Some(token) = overrides.jira_token {
            self.trackers.jira.token = Some(token);
        }
        if let Some(path) = overrides.launchpad_credentials {
            self.trackers.launchpad.credentials_file = Some(path);
        }
    }

    /// Database path: `explicit`, then `TRIAGE_DB`, then `database`, then the data dir.
    pub fn db_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit.or_else(env::db_path) {
            return Ok(path);
        }
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(DB_FILE_NAME))
            .ok_or(Error::NoDefaultDir("data"))
    }
}

/// Config file path: `explicit`, then `TRIAGE_CONFIG`, then the user config dir.
///
/// Returns the path and whether it was explicitly requested.
pub fn config_path(explicit: Option<PathBuf>) -> Result<(PathBuf, bool)> {
    if let Some(path) = explicit {
        return Ok((path, true));
    }
    if let Some(path) = env::config_path() {
        return Ok((path, false));
    }
    dirs::config_dir()
        .map(|dir| (dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME), false))
        .ok_or(Error::NoDefaultDir("config"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
