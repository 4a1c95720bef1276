// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn default_config_registers_every_tracker() {
    let registry = build_registry(&TrackersConfig::default());
    assert_eq!(registry.names(), vec!["github", "jira", "launchpad"]);
}

#[test]
fn misconfigured_tracker_is_skipped() {
    let mut config = TrackersConfig::default();
    config.launchpad.anonymous = false;
    config.jira.email = Some("qa@example.com".to_string());

    let registry = build_registry(&config);
    assert_eq!(registry.names(), vec!["github"]);
}
