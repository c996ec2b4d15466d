// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Requirement configuration: which credentials an employee must hold.

use crate::credential::CredentialKey;
use crate::employee::EmployeeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the requirement catalog.
///
/// Owned by the external configuration store. The `key` field may be empty
/// when loaded from legacy snapshots; the engine fills it from `name`
/// before resolving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementEntry {
    pub employee: EmployeeId,
    #[serde(default)]
    pub key: CredentialKey,
    pub name: String,
    pub required: bool,
    #[serde(default)]
    pub strategic: bool,
    /// Renewal interval in months; `None` means unlimited validity once
    /// achieved.
    #[serde(default)]
    pub renewal_months: Option<u32>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
}

crate::builder! {
    pub struct RequirementBuilder => RequirementEntry {
        into {
            employee: EmployeeId = "E-1",
            key: CredentialKey = "",
            name: String = "",
            comment: String = "",
        }
        set {
            required: bool = true,
            strategic: bool = false,
            renewal_months: Option<u32> = None,
            modified_at: Option<DateTime<Utc>> = None,
        }
    }
}
