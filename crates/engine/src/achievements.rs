// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-known achievement state per (employee, credential) pair.

use crate::normalize::{DisplayNames, NameNormalizer};
use crate::report::Warnings;
use crate::scope::OrgScope;
use chrono::{Months, NaiveDate};
use cw_core::{
    AchievementRecord, AchievementSource, CredentialKey, EmployeeId, HoldingRow, Outcome,
    ResultRow,
};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Merged view over the results and holdings feeds.
///
/// Ephemeral — rebuilt from scratch every pass. The replacement rule
/// prefers records with a later expiry over more recent achieved dates
/// (see [`AchievementRecord::is_better_than`]): expiry is the operative
/// fact for compliance.
#[derive(Debug, Default)]
pub struct AchievementIndex {
    map: HashMap<(EmployeeId, CredentialKey), AchievementRecord>,
}

impl AchievementIndex {
    pub fn build(
        results: &[ResultRow],
        holdings: &[HoldingRow],
        normalizer: &NameNormalizer,
        scope: &OrgScope,
        display_names: &mut DisplayNames,
        warnings: &mut Warnings,
    ) -> Self {
        let mut index = AchievementIndex::default();

        for row in results {
            let Some((employee, key)) =
                keyed(&row.employee_id, &row.name, normalizer, scope, "results", warnings)
            else {
                continue;
            };
            if let Some(warning) = display_names.record(&key, &row.name) {
                warnings.push(warning);
            }
            index.consider(
                employee,
                key,
                AchievementRecord {
                    outcome: Outcome::classify(&row.status),
                    achieved: row.achieved,
                    expires: row.expires,
                    source: AchievementSource::Results,
                },
            );
        }

        for row in holdings {
            let Some((employee, key)) =
                keyed(&row.employee_id, &row.name, normalizer, scope, "holdings", warnings)
            else {
                continue;
            };
            if let Some(warning) = display_names.record(&key, &row.name) {
                warnings.push(warning);
            }
            // The holdings overview lists credentials the employee
            // currently holds; a listed row implies a pass.
            index.consider(
                employee,
                key,
                AchievementRecord {
                    outcome: Outcome::Passed,
                    achieved: row.issued,
                    expires: row.expires,
                    source: AchievementSource::Holdings,
                },
            );
        }

        tracing::debug!(pairs = index.map.len(), "achievement index built");
        index
    }

    fn consider(&mut self, employee: EmployeeId, key: CredentialKey, candidate: AchievementRecord) {
        match self.map.entry((employee, key)) {
            Entry::Occupied(mut slot) => {
                if candidate.is_better_than(slot.get()) {
                    slot.insert(candidate);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }

    pub fn get(&self, employee: &EmployeeId, key: &CredentialKey) -> Option<&AchievementRecord> {
        self.map.get(&(employee.clone(), key.clone()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn keyed(
    employee_id: &str,
    name: &str,
    normalizer: &NameNormalizer,
    scope: &OrgScope,
    feed: &str,
    warnings: &mut Warnings,
) -> Option<(EmployeeId, CredentialKey)> {
    let employee = EmployeeId::new(employee_id);
    let key = normalizer.normalize(name);
    if employee.is_empty() || key.is_empty() {
        warnings.push(format!(
            "dropping {feed} row without employee id or credential name \
             (employee='{employee_id}', name='{name}')"
        ));
        return None;
    }
    if !scope.contains(&employee) {
        return None;
    }
    Some((employee, key))
}

/// The expiry date that actually governs compliance for a record: the
/// recorded expiry when present, otherwise one derived from the achieved
/// date and the configured renewal interval. `None` means no expiry can
/// be proven.
pub fn effective_expiry(
    record: &AchievementRecord,
    renewal_months: Option<u32>,
) -> Option<NaiveDate> {
    if record.expires.is_some() {
        return record.expires;
    }
    let achieved = record.achieved?;
    let months = renewal_months?;
    achieved.checked_add_months(Months::new(months))
}

#[cfg(test)]
#[path = "achievements_tests.rs"]
mod tests;
