// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Requirement resolution: which (employee, credential) pairs need an
//! active task.

use crate::normalize::NameNormalizer;
use crate::report::Warnings;
use crate::scope::OrgScope;
use cw_core::{CredentialKey, EmployeeId, RequirementEntry};
use std::collections::HashMap;

/// Fill missing keys from the display name. Entries from legacy snapshots
/// often carry only the raw name.
pub fn rekey(entries: &mut [RequirementEntry], normalizer: &NameNormalizer) {
    for entry in entries {
        if entry.key.is_empty() {
            entry.key = normalizer.normalize(&entry.name);
        }
    }
}

/// Resolve the requirement catalog to the pairs this pass must cover:
/// `required == true`, employee in scope, one entry per (employee, key)
/// keeping the most recently modified. Rows without a usable employee id
/// or name are dropped with a warning.
pub fn resolve(
    entries: &[RequirementEntry],
    scope: &OrgScope,
    warnings: &mut Warnings,
) -> Vec<RequirementEntry> {
    let mut best: HashMap<(EmployeeId, CredentialKey), RequirementEntry> = HashMap::new();

    for entry in entries {
        if entry.employee.is_empty() || entry.key.is_empty() {
            warnings.push(format!(
                "dropping requirement row without employee id or credential name \
                 (employee='{}', name='{}')",
                entry.employee, entry.name
            ));
            continue;
        }
        if !entry.required || !scope.contains(&entry.employee) {
            continue;
        }

        let key = (entry.employee.clone(), entry.key.clone());
        let replace = match best.get(&key) {
            Some(current) => entry.modified_at > current.modified_at,
            None => true,
        };
        if replace {
            best.insert(key, entry.clone());
        }
    }

    let mut resolved: Vec<RequirementEntry> = best.into_values().collect();
    resolved.sort_by(|a, b| (&a.employee, &a.key).cmp(&(&b.employee, &b.key)));
    resolved
}

#[cfg(test)]
#[path = "requirements_tests.rs"]
mod tests;
