// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::achievement::{HoldingRow, ResultRow};
use crate::employee::{Employee, EmployeeId};
use crate::enrollment::EnrollmentRow;
use chrono::NaiveDate;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::task::TaskStatus;
    use proptest::prelude::*;

    pub fn arb_task_status() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![
            Just(TaskStatus::Open),
            Just(TaskStatus::Enrolled),
            Just(TaskStatus::Scheduled),
            Just(TaskStatus::Queued),
            Just(TaskStatus::NeedsRetake),
            Just(TaskStatus::OnHold),
            Just(TaskStatus::Rejected),
            Just(TaskStatus::Absent),
            Just(TaskStatus::RecentlyAchieved),
            Just(TaskStatus::Closed),
        ]
    }

    /// Canonical-key-shaped strings. Three characters minimum so no value
    /// collides with a bare voltage abbreviation, which the normalizer
    /// re-expands by design.
    pub fn arb_key_string() -> impl Strategy<Value = String> {
        "[a-z0-9]{3,24}"
    }
}

// ── Record factory functions ────────────────────────────────────────────

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn employee(id: &str, unit: &str) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        name: format!("Employee {id}"),
        unit: Some(unit.to_string()),
        active: true,
        personnel_nr: None,
    }
}

pub fn inactive_employee(id: &str, unit: &str) -> Employee {
    Employee { active: false, ..employee(id, unit) }
}

pub fn result_row(
    employee_id: &str,
    name: &str,
    status: &str,
    achieved: Option<NaiveDate>,
    expires: Option<NaiveDate>,
) -> ResultRow {
    ResultRow {
        employee_id: employee_id.to_string(),
        name: name.to_string(),
        status: status.to_string(),
        achieved,
        expires,
    }
}

pub fn holding_row(
    employee_id: &str,
    name: &str,
    issued: Option<NaiveDate>,
    expires: Option<NaiveDate>,
) -> HoldingRow {
    HoldingRow {
        employee_id: employee_id.to_string(),
        name: name.to_string(),
        issued,
        expires,
    }
}

pub fn enrollment_row(
    employee_id: &str,
    name: &str,
    scheduled: Option<NaiveDate>,
    location: &str,
) -> EnrollmentRow {
    EnrollmentRow {
        employee_id: employee_id.to_string(),
        name: name.to_string(),
        scheduled,
        location: location.to_string(),
    }
}
