// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn empty_sections_use_defaults() {
    let config: TrackersConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, TrackersConfig::default());
    assert_eq!(config.github.base_url, "https://api.github.com");
    assert_eq!(config.jira.base_url, "https://warthogs.atlassian.net");
    assert_eq!(config.launchpad.base_url, "https://api.launchpad.net/devel");
    assert!(config.launchpad.anonymous);
    assert_eq!(config.github.timeout_secs, 10);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config: TrackersConfig =
        serde_json::from_str(r#"{"jira": {"email": "qa@example.com", "token": "t"}}"#).unwrap();
    assert_eq!(config.jira.email.as_deref(), Some("qa@example.com"));
    assert_eq!(config.jira.token.as_deref(), Some("t"));
    assert_eq!(config.jira.base_url, "https://warthogs.atlassian.net");
    assert_eq!(config.jira.timeout_secs, 10);
}

#[test]
fn unset_secrets_are_not_serialized() {
    let json = serde_json::to_string(&GithubConfig::default()).unwrap();
    assert!(!json.contains("token"));
}
