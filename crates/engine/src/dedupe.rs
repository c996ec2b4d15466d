// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Duplicate collapse for worklists, requirement configs and holdings.
//!
//! The worklist invariant — at most one active task per
//! (employee, key, task_type) — erodes when upstream systems resubmit
//! rows. Each routine keeps exactly one, most authoritative row per
//! group.

use crate::normalize::NameNormalizer;
use cw_core::{HoldingRow, RequirementEntry, Task};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Collapse duplicate tasks per (employee, key, task_type, status).
///
/// Within a group the kept row is chosen by: persisted id first, then
/// most recent `updated_at`, then most recent `created_at`. Input order
/// is preserved for the surviving rows.
pub fn dedupe_tasks(tasks: Vec<Task>) -> Vec<Task> {
    let before = tasks.len();
    // winner index per group key
    let mut winners: HashMap<(String, String, String, String), usize> = HashMap::new();

    for (idx, task) in tasks.iter().enumerate() {
        let group = (
            task.employee.as_str().to_string(),
            task.key.as_str().to_string(),
            task.task_type.to_string(),
            task.status.to_string(),
        );
        match winners.entry(group) {
            Entry::Occupied(mut slot) => {
                if ranks_higher(task, &tasks[*slot.get()]) {
                    *slot.get_mut() = idx;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
        }
    }

    let keep: std::collections::HashSet<usize> = winners.into_values().collect();
    let kept: Vec<Task> = tasks
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| keep.contains(idx))
        .map(|(_, task)| task)
        .collect();

    if kept.len() < before {
        tracing::info!(before, after = kept.len(), "duplicate tasks removed");
    }
    kept
}

fn ranks_higher(candidate: &Task, incumbent: &Task) -> bool {
    (candidate.persisted, candidate.updated_at, candidate.created_at)
        > (incumbent.persisted, incumbent.updated_at, incumbent.created_at)
}

/// Collapse duplicate requirement rows per (employee, key), keeping the
/// most recently modified. Entries must be rekeyed first.
pub fn dedupe_requirements(entries: Vec<RequirementEntry>) -> Vec<RequirementEntry> {
    let before = entries.len();
    let mut winners: HashMap<(String, String), usize> = HashMap::new();

    for (idx, entry) in entries.iter().enumerate() {
        let group = (entry.employee.as_str().to_string(), entry.key.as_str().to_string());
        match winners.entry(group) {
            Entry::Occupied(mut slot) => {
                if entry.modified_at > entries[*slot.get()].modified_at {
                    *slot.get_mut() = idx;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
        }
    }

    let keep: std::collections::HashSet<usize> = winners.into_values().collect();
    let kept: Vec<RequirementEntry> = entries
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| keep.contains(idx))
        .map(|(_, entry)| entry)
        .collect();

    if kept.len() < before {
        tracing::info!(before, after = kept.len(), "duplicate requirement rows removed");
    }
    kept
}

/// Collapse duplicate holdings per (employee, key), keeping the row with
/// the latest expiry.
pub fn dedupe_holdings(rows: Vec<HoldingRow>, normalizer: &NameNormalizer) -> Vec<HoldingRow> {
    let before = rows.len();
    let mut winners: HashMap<(String, String), usize> = HashMap::new();

    for (idx, row) in rows.iter().enumerate() {
        let key = normalizer.normalize(&row.name);
        let group = (row.employee_id.trim().to_string(), key.as_str().to_string());
        match winners.entry(group) {
            Entry::Occupied(mut slot) => {
                if row.expires > rows[*slot.get()].expires {
                    *slot.get_mut() = idx;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
        }
    }

    let keep: std::collections::HashSet<usize> = winners.into_values().collect();
    let kept: Vec<HoldingRow> = rows
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| keep.contains(idx))
        .map(|(_, row)| row)
        .collect();

    if kept.len() < before {
        tracing::info!(before, after = kept.len(), "duplicate holding rows removed");
    }
    kept
}

#[cfg(test)]
#[path = "dedupe_tests.rs"]
mod tests;
