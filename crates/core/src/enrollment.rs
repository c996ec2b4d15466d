// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Future-session enrollments from the external scheduling feed.

use crate::credential::CredentialKey;
use crate::employee::EmployeeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw enrollment row as loaded from the scheduling feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRow {
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub scheduled: Option<NaiveDate>,
    #[serde(default)]
    pub location: String,
}

/// Scoped, deduplicated enrollment for one (employee, credential) pair.
/// Read-only input to the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentRecord {
    pub employee: EmployeeId,
    pub key: CredentialKey,
    pub scheduled: Option<NaiveDate>,
    pub location: String,
}
