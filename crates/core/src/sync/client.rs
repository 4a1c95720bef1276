// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The contract synchronizers consume from per-tracker HTTP clients.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Issue fields as reported by a tracker, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueData {
    pub title: String,
    /// Backend-native state string, e.g. `closed`, `In Progress`, `Fix Released`.
    pub state: String,
    #[serde(default)]
    pub state_reason: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Completeness flag for trackers that report one (Launchpad bug tasks).
    #[serde(default)]
    pub is_complete: Option<bool>,
    #[serde(default)]
    pub raw: serde_json::Value,
}

/// Failures reported by an issue client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("issue {key} not found in {project}")]
    NotFound { project: String, key: String },

    #[error("rate limited{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<u64> },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("client configuration error: {0}")]
    Config(String),
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(", retry after {secs}s"),
        None => String::new(),
    }
}

impl ClientError {
    /// Errors worth retrying on the next scheduled pass without operator action.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::RateLimited { .. } | ClientError::Transport(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Fetches one issue from an external tracker.
///
/// Implementations block for the network round trip and should bound it
/// with a timeout.
pub trait IssueClient: Send + Sync {
    fn get_issue(&self, project: &str, key: &str) -> Result<IssueData, ClientError>;
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
