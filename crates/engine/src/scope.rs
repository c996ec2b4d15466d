// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Organizational-unit scoping.
//!
//! The scope is the authoritative set of employees the current pass may
//! touch. It gates reads when the lookup indexes are built, gates writes
//! in the reconciler, and is applied once more immediately before
//! persistence — a row for another unit must never survive to the store.

use cw_core::{Employee, EmployeeId, Task};
use std::collections::HashSet;

/// The set of active employees in the active organizational unit.
#[derive(Debug, Clone)]
pub struct OrgScope {
    unit: Option<String>,
    ids: HashSet<EmployeeId>,
}

impl OrgScope {
    /// Build the scope from the roster. `unit = None` selects every
    /// active employee; that mode bypasses the unit boundary and is
    /// logged so operators notice.
    pub fn build(roster: &[Employee], unit: Option<&str>) -> Self {
        let unit = unit.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());

        let ids: HashSet<EmployeeId> = roster
            .iter()
            .filter(|e| e.active && !e.id.is_empty())
            .filter(|e| unit.as_deref().is_none_or(|u| e.in_unit(u)))
            .map(|e| e.id.clone())
            .collect();

        match &unit {
            Some(code) => {
                tracing::debug!(unit = %code, employees = ids.len(), "scope built")
            }
            None => tracing::warn!(
                employees = ids.len(),
                "no unit code set, scope covers all active employees"
            ),
        }

        OrgScope { unit, ids }
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Final defense-in-depth gate before persistence: split the worklist
    /// into in-scope rows and the rows that must not be written.
    pub fn split_tasks(&self, tasks: Vec<Task>) -> (Vec<Task>, Vec<Task>) {
        tasks.into_iter().partition(|t| self.contains(&t.employee))
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
