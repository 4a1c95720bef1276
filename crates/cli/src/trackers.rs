// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring tracker clients into synchronizers.

use triage_core::sync::{
    ClientError, GithubSynchronizer, JiraSynchronizer, LaunchpadSynchronizer, Synchronizer,
    SynchronizerRegistry,
};
use triage_trackers::{GithubClient, JiraClient, LaunchpadClient, TrackersConfig};

/// Build a registry with one synchronizer per tracker.
///
/// A tracker whose client cannot be configured is left out with a warning;
/// its issues then fail to sync with "no synchronizer available".
pub fn build_registry(config: &TrackersConfig) -> SynchronizerRegistry {
    let candidates: [(&str, Result<Box<dyn Synchronizer>, ClientError>); 3] = [
        (
            "github",
            GithubClient::new(&config.github)
                .map(|c| Box::new(GithubSynchronizer::new(Box::new(c))) as Box<dyn Synchronizer>),
        ),
        (
            "jira",
            JiraClient::new(&config.jira)
                .map(|c| Box::new(JiraSynchronizer::new(Box::new(c))) as Box<dyn Synchronizer>),
        ),
        (
            "launchpad",
            LaunchpadClient::new(&config.launchpad).map(|c| {
                Box::new(LaunchpadSynchronizer::new(Box::new(c))) as Box<dyn Synchronizer>
            }),
        ),
    ];

    let mut registry = SynchronizerRegistry::new();
    for (name, candidate) in candidates {
        match candidate {
            Ok(synchronizer) => registry.register(synchronizer),
            Err(e) => tracing::warn!("{} synchronizer disabled: {}", name, e),
        }
    }
    registry
}

#[cfg(test)]
#[path = "trackers_tests.rs"]
mod tests;
