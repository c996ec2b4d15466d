// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Absence inference for completed sessions.
//!
//! When several employees sat the same session and results exist for some
//! of them but not all, the silent ones were almost certainly absent
//! rather than "still pending". Single-member groups and groups where
//! nobody has results yet are ambiguous and left untouched — results may
//! simply not have been entered.

use crate::normalize::NameNormalizer;
use crate::report::Tally;
use crate::settings::ReconcileSettings;
use chrono::NaiveDate;
use cw_core::{Clock, CredentialKey, ResultRow, Task, TaskStatus};
use std::collections::{HashMap, HashSet};

/// Mark Enrolled tasks of past sessions as Absent when peers of the same
/// session already have recorded results.
///
/// Session membership is keyed on (credential, session date) and includes
/// tasks already closed by an achievement — a peer whose pass was
/// processed earlier in the pipeline still proves the session took place.
pub fn detect_absences<C: Clock>(
    tasks: &mut [Task],
    results: &[ResultRow],
    normalizer: &NameNormalizer,
    clock: &C,
    settings: &ReconcileSettings,
    tally: &mut Tally,
) {
    let today = clock.today();
    let now = clock.now();

    let mut sessions: HashMap<(CredentialKey, NaiveDate), Vec<usize>> = HashMap::new();
    for (idx, task) in tasks.iter().enumerate() {
        let Some(session_date) = task.enrolled_date else {
            continue;
        };
        if (today - session_date).num_days() <= settings.session_grace_days {
            continue;
        }
        if !matches!(
            task.status,
            TaskStatus::Enrolled | TaskStatus::Closed | TaskStatus::Absent
        ) {
            continue;
        }
        sessions.entry((task.key.clone(), session_date)).or_default().push(idx);
    }

    for ((key, session_date), members) in sessions {
        if members.len() < settings.min_session_size {
            continue;
        }

        let with_results: HashSet<String> = results
            .iter()
            .filter(|r| normalizer.normalize(&r.name) == key)
            .filter(|r| {
                r.achieved.is_some_and(|d| {
                    (d - session_date).num_days().abs() <= settings.result_window_days
                })
            })
            .map(|r| r.employee_id.trim().to_string())
            .collect();

        if with_results.is_empty() {
            continue;
        }

        for idx in members {
            let task = &mut tasks[idx];
            if task.status != TaskStatus::Enrolled {
                continue;
            }
            if with_results.contains(task.employee.as_str()) {
                continue;
            }
            tracing::info!(
                employee = %task.employee,
                credential = %key,
                session = %session_date,
                "peers have results, marking absent"
            );
            task.transition(
                TaskStatus::Absent,
                format!("no result after session on {session_date} (likely absent)"),
                now,
            );
            tally.updated += 1;
        }
    }
}

#[cfg(test)]
#[path = "absence_tests.rs"]
mod tests;
