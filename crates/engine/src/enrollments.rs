// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Future-session enrollments mapped onto (employee, credential) pairs.

use crate::normalize::NameNormalizer;
use crate::report::Warnings;
use crate::scope::OrgScope;
use cw_core::{CredentialKey, EmployeeId, EnrollmentRecord, EnrollmentRow};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Scoped, deduplicated view over the scheduling feed. Duplicate
/// enrollments for a pair keep the latest scheduled date.
#[derive(Debug, Default)]
pub struct EnrollmentIndex {
    map: HashMap<(EmployeeId, CredentialKey), EnrollmentRecord>,
}

impl EnrollmentIndex {
    pub fn build(
        rows: &[EnrollmentRow],
        normalizer: &NameNormalizer,
        scope: &OrgScope,
        warnings: &mut Warnings,
    ) -> Self {
        let mut index = EnrollmentIndex::default();

        for row in rows {
            let employee = EmployeeId::new(&row.employee_id);
            let key = normalizer.normalize(&row.name);
            if employee.is_empty() || key.is_empty() {
                warnings.push(format!(
                    "dropping enrollment row without employee id or credential name \
                     (employee='{}', name='{}')",
                    row.employee_id, row.name
                ));
                continue;
            }
            if !scope.contains(&employee) {
                continue;
            }

            let record = EnrollmentRecord {
                employee: employee.clone(),
                key: key.clone(),
                scheduled: row.scheduled,
                location: row.location.trim().to_string(),
            };

            match index.map.entry((employee, key)) {
                Entry::Occupied(mut slot) => {
                    if record.scheduled > slot.get().scheduled {
                        slot.insert(record);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
            }
        }

        tracing::debug!(pairs = index.map.len(), "enrollment index built");
        index
    }

    pub fn get(&self, employee: &EmployeeId, key: &CredentialKey) -> Option<&EnrollmentRecord> {
        self.map.get(&(employee.clone(), key.clone()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
#[path = "enrollments_tests.rs"]
mod tests;
