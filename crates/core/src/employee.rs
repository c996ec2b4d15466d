// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Roster records: employees and their stable external identifiers.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Stable external identifier for an employee.
///
/// Owned by the roster source; certwatch never generates one. Matching is
/// exact on the trimmed string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EmployeeId(SmolStr);

impl EmployeeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id.as_ref().trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EmployeeId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for EmployeeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One row of the staff roster.
///
/// Read-only input to every reconciliation pass; the reconciler never
/// creates or deletes employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default)]
    pub name: String,
    /// Organizational-unit code. `None` means the roster source did not
    /// attribute the employee to a unit.
    #[serde(default)]
    pub unit: Option<String>,
    pub active: bool,
    /// Payroll/personnel number, carried for display and persistence only.
    #[serde(default)]
    pub personnel_nr: Option<String>,
}

impl Employee {
    /// Whether this employee belongs to the given unit (trimmed comparison).
    pub fn in_unit(&self, unit: &str) -> bool {
        self.unit.as_deref().map(str::trim) == Some(unit.trim())
    }
}

#[cfg(test)]
#[path = "employee_tests.rs"]
mod tests;
