// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::issue::Issue;

use super::synchronizer::Synchronizer;

/// Ordered list of synchronizers; the first one that claims an issue wins.
#[derive(Default)]
pub struct SynchronizerRegistry {
    synchronizers: Vec<Box<dyn Synchronizer>>,
}

impl SynchronizerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a synchronizer after those already present.
    pub fn register(&mut self, synchronizer: Box<dyn Synchronizer>) {
        tracing::debug!("registered {} synchronizer", synchronizer.name());
        self.synchronizers.push(synchronizer);
    }

    /// Builder form of [`SynchronizerRegistry::register`].
    pub fn with(mut self, synchronizer: Box<dyn Synchronizer>) -> Self {
        self.register(synchronizer);
        self
    }

    /// The synchronizer that owns `issue`, if any.
    pub fn find(&self, issue: &Issue) -> Option<&dyn Synchronizer> {
        self.synchronizers
            .iter()
            .find(|s| s.can_sync(issue))
            .map(|s| s.as_ref())
    }

    /// Index of the synchronizer that owns `issue`.
    pub fn position(&self, issue: &Issue) -> Option<usize> {
        self.synchronizers.iter().position(|s| s.can_sync(issue))
    }

    pub fn synchronizers(&self) -> &[Box<dyn Synchronizer>] {
        &self.synchronizers
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.synchronizers.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.synchronizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synchronizers.is_empty()
    }
}
