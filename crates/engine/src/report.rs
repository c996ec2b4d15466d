// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pass outcome reporting.

use cw_core::Task;

/// Collected warnings for one pass. Every entry is also emitted as a
/// `tracing` warning the moment it is recorded.
#[derive(Debug, Default)]
pub struct Warnings {
    items: Vec<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.items.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Mutation counters kept by the reconciler passes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub created: usize,
    pub updated: usize,
    pub closed: usize,
}

/// Result of one reconciliation pass.
///
/// Always produced — data-quality problems and even whole-source
/// unavailability surface as warnings on a fail-closed outcome, never as
/// a panic or an error the caller must unwrap.
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// The computed worklist. On an aborted pass this is the loaded
    /// worklist, untouched. On a persistence failure it is the computed
    /// state, retained so a retry can resend it unchanged.
    pub tasks: Vec<Task>,
    pub created: usize,
    pub updated: usize,
    pub closed: usize,
    /// Whether the persistence collaborator accepted the worklist.
    pub persisted: bool,
    pub warnings: Vec<String>,
}

impl ReconcileOutcome {
    /// An aborted pass: worklist unchanged, nothing counted.
    pub fn aborted(tasks: Vec<Task>, warnings: Warnings) -> Self {
        ReconcileOutcome {
            tasks,
            created: 0,
            updated: 0,
            closed: 0,
            persisted: false,
            warnings: warnings.into_vec(),
        }
    }
}
