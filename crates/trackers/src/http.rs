// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared request plumbing and HTTP status classification.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use triage_core::sync::ClientError;

const USER_AGENT: &str = concat!("triage/", env!("CARGO_PKG_VERSION"));
const MAX_MESSAGE_LEN: usize = 200;

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ClientError::Config(e.to_string()))
}

/// Send `request` and decode a JSON body, classifying non-2xx responses.
pub(crate) fn fetch_json(
    request: RequestBuilder,
    project: &str,
    key: &str,
) -> Result<serde_json::Value, ClientError> {
    let response = request.send().map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        return response
            .json::<serde_json::Value>()
            .map_err(|e| ClientError::InvalidResponse(e.to_string()));
    }

    let headers = response.headers().clone();
    let body = response.text().unwrap_or_default();
    tracing::debug!("{} for {}/{}: {}", status, project, key, body);
    Err(classify(status, &headers, &body, project, key))
}

pub(crate) fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_decode() {
        ClientError::InvalidResponse(err.to_string())
    } else {
        ClientError::Transport(err.to_string())
    }
}

/// Map an unsuccessful response onto a [`ClientError`] class.
pub(crate) fn classify(
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
    project: &str,
    key: &str,
) -> ClientError {
    let retry_after = header_u64(headers, RETRY_AFTER.as_str());
    match status.as_u16() {
        404 => ClientError::NotFound {
            project: project.to_string(),
            key: key.to_string(),
        },
        429 => ClientError::RateLimited { retry_after },
        // GitHub signals an exhausted primary quota with 403.
        403 if header_u64(headers, "x-ratelimit-remaining") == Some(0) => {
            ClientError::RateLimited { retry_after }
        }
        401 => ClientError::Unauthorized(error_message(status, body)),
        code => ClientError::Api {
            status: code,
            message: error_message(status, body),
        },
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Best-effort human message from an error body.
///
/// Understands GitHub's `message` and Jira's `errorMessages`; otherwise
/// falls back to the raw body and then the status reason.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
        if let Some(first) = value
            .get("errorMessages")
            .and_then(|m| m.as_array())
            .and_then(|m| m.first())
            .and_then(|m| m.as_str())
        {
            return first.to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }
    body.chars().take(MAX_MESSAGE_LEN).collect()
}

/// Join a configured base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
