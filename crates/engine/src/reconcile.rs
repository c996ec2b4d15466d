// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The task state machine.
//!
//! Five passes over the worklist, run in a fixed order by the pipeline:
//! close what configuration no longer requires, close for employees who
//! left, fold in exam results, fold in enrollments (enrollment always
//! wins over a stale failing or expired record), then create tasks for
//! requirements that still lack coverage.

use crate::achievements::{effective_expiry, AchievementIndex};
use crate::enrollments::EnrollmentIndex;
use crate::normalize::NameNormalizer;
use crate::report::Tally;
use crate::settings::ReconcileSettings;
use cw_core::{
    Clock, CredentialKey, Employee, EmployeeId, Outcome, RequirementEntry, Task, TaskStatus,
    TaskType,
};
use std::collections::{HashMap, HashSet};

pub struct Reconciler<'a, C: Clock> {
    settings: &'a ReconcileSettings,
    clock: &'a C,
}

impl<'a, C: Clock> Reconciler<'a, C> {
    pub fn new(settings: &'a ReconcileSettings, clock: &'a C) -> Self {
        Self { settings, clock }
    }

    /// Fill missing task keys from the display name. Worklists written by
    /// the predecessor system carry raw names only.
    pub fn rekey_tasks(&self, tasks: &mut [Task], normalizer: &NameNormalizer) {
        for task in tasks {
            if task.key.is_empty() {
                task.key = normalizer.normalize(&task.name);
            }
        }
    }

    /// Close tasks whose configuration entry flipped to `required = false`.
    ///
    /// Enrolled tasks, tasks with a session date and retake tasks survive
    /// config cleanup: a booked seat or a failed exam keeps its task even
    /// when someone unticks the requirement.
    pub fn close_unrequired(
        &self,
        tasks: &mut [Task],
        requirements: &[RequirementEntry],
        tally: &mut Tally,
    ) {
        let unrequired: HashSet<(&EmployeeId, &CredentialKey)> = requirements
            .iter()
            .filter(|r| !r.required && !r.key.is_empty())
            .map(|r| (&r.employee, &r.key))
            .collect();
        if unrequired.is_empty() {
            return;
        }

        let now = self.clock.now();
        for task in tasks.iter_mut() {
            if !matches!(task.status, TaskStatus::Open | TaskStatus::Queued | TaskStatus::OnHold) {
                continue;
            }
            if task.enrolled_date.is_some() || is_retake_detail(&task.detail) {
                continue;
            }
            if unrequired.contains(&(&task.employee, &task.key)) {
                task.transition(TaskStatus::Closed, "no longer required", now);
                task.required = false;
                tally.closed += 1;
            }
        }
    }

    /// Close open tasks for employees the roster no longer lists as
    /// active. Employees missing from the roster entirely are left alone:
    /// absence of data is not evidence of departure.
    pub fn close_for_inactive(&self, tasks: &mut [Task], roster: &[Employee], tally: &mut Tally) {
        let inactive: HashSet<&EmployeeId> =
            roster.iter().filter(|e| !e.active).map(|e| &e.id).collect();
        if inactive.is_empty() {
            return;
        }

        let now = self.clock.now();
        for task in tasks.iter_mut() {
            if matches!(task.status, TaskStatus::Closed | TaskStatus::Rejected) {
                continue;
            }
            if inactive.contains(&task.employee) {
                task.transition(TaskStatus::Closed, "employee no longer active", now);
                tally.closed += 1;
            }
        }
    }

    /// Fold the merged achievement state into existing tasks: a pass with
    /// enough remaining validity closes the task, a failure turns it into
    /// a retake. Sticky statuses are never touched.
    pub fn apply_results(
        &self,
        tasks: &mut [Task],
        achievements: &AchievementIndex,
        requirements: &[RequirementEntry],
        tally: &mut Tally,
    ) {
        let renewals: HashMap<(&EmployeeId, &CredentialKey), Option<u32>> = requirements
            .iter()
            .map(|r| ((&r.employee, &r.key), r.renewal_months))
            .collect();

        let now = self.clock.now();
        let today = self.clock.today();

        for task in tasks.iter_mut() {
            if task.status.is_sticky() || task.status.is_terminal() {
                continue;
            }
            let Some(record) = achievements.get(&task.employee, &task.key) else {
                continue;
            };

            match record.outcome {
                Outcome::Passed => {
                    let renewal =
                        renewals.get(&(&task.employee, &task.key)).copied().flatten();
                    let expiry = effective_expiry(record, renewal);
                    let satisfied = record.is_unlimited()
                        || expiry.is_none_or(|d| {
                            (d - today).num_days() > self.settings.expiry_horizon_days
                        });
                    if satisfied {
                        let detail = match record.achieved {
                            Some(d) => format!("achieved on {d}"),
                            None => "achieved".to_string(),
                        };
                        task.transition(TaskStatus::Closed, detail, now);
                        task.achieved_date = record.achieved;
                        task.expiry_date = record.expires;
                        tally.closed += 1;
                    }
                }
                Outcome::Failed => {
                    if task.status != TaskStatus::NeedsRetake {
                        let detail = match record.achieved {
                            Some(d) => format!("not passed ({d}) - re-enrollment needed"),
                            None => "not passed - re-enrollment needed".to_string(),
                        };
                        task.transition(TaskStatus::NeedsRetake, detail, now);
                        task.enrolled_date = None;
                        task.enrolled_location = None;
                        tally.updated += 1;
                    }
                }
                Outcome::Pending => {}
            }
        }
    }

    /// Fold the scheduling feed into existing tasks. A known enrollment
    /// always wins over whatever state the task is in, short of closed or
    /// sticky: a booked retake supersedes a stale failing record.
    pub fn apply_enrollments(
        &self,
        tasks: &mut [Task],
        enrollments: &EnrollmentIndex,
        tally: &mut Tally,
    ) {
        let now = self.clock.now();

        for task in tasks.iter_mut() {
            if task.status.is_sticky() || task.status.is_terminal() {
                continue;
            }
            let Some(record) = enrollments.get(&task.employee, &task.key) else {
                continue;
            };

            let up_to_date =
                task.status == TaskStatus::Enrolled && task.enrolled_date == record.scheduled;
            if up_to_date {
                continue;
            }

            task.transition(TaskStatus::Enrolled, "confirmed by scheduler", now);
            task.enrolled_date = record.scheduled;
            task.enrolled_location =
                Some(record.location.clone()).filter(|l| !l.is_empty());
            // An enrolled task stays visible even when the requirement
            // row lags behind.
            task.required = true;
            tally.updated += 1;
        }
    }

    /// Create tasks for resolved requirements that lack coverage.
    ///
    /// The existence check deliberately ignores the task type tag:
    /// upstream systems tag the same credential inconsistently, and a
    /// second task under a different tag would still be a duplicate.
    pub fn create_missing(
        &self,
        requirements: &[RequirementEntry],
        achievements: &AchievementIndex,
        enrollments: &EnrollmentIndex,
        tasks: &mut Vec<Task>,
        tally: &mut Tally,
    ) {
        let mut existing: HashMap<(EmployeeId, CredentialKey), Vec<TaskStatus>> = HashMap::new();
        for task in tasks.iter() {
            existing
                .entry((task.employee.clone(), task.key.clone()))
                .or_default()
                .push(task.status);
        }

        let today = self.clock.today();

        for req in requirements {
            let pair = (req.employee.clone(), req.key.clone());
            if let Some(statuses) = existing.get(&pair) {
                // Protected-status guard: never downgrade or duplicate.
                if statuses.iter().any(|s| s.is_protected()) {
                    continue;
                }
                // An active task already represents this requirement.
                if statuses.iter().any(|s| !s.is_terminal()) {
                    continue;
                }
            }

            // Enrollment wins over achievement state.
            if let Some(enrollment) = enrollments.get(&req.employee, &req.key) {
                let detail = match enrollment.scheduled {
                    Some(d) => format!("scheduled for {d}"),
                    None => "scheduled, date unknown".to_string(),
                };
                let mut task = self.new_task(req, TaskStatus::Enrolled, detail);
                task.enrolled_date = enrollment.scheduled;
                task.enrolled_location =
                    Some(enrollment.location.clone()).filter(|l| !l.is_empty());
                existing.entry(pair).or_default().push(task.status);
                tasks.push(task);
                tally.created += 1;
                continue;
            }

            let task = match achievements.get(&req.employee, &req.key) {
                None => Some(self.new_task(req, TaskStatus::Open, "never achieved")),
                Some(record) => match record.outcome {
                    Outcome::Failed => {
                        Some(self.new_task(req, TaskStatus::Open, "not passed - retake needed"))
                    }
                    // No usable outcome recorded: indistinguishable from
                    // never achieved.
                    Outcome::Pending => {
                        Some(self.new_task(req, TaskStatus::Open, "never achieved"))
                    }
                    Outcome::Passed => {
                        if record.is_unlimited() {
                            None
                        } else {
                            match effective_expiry(record, req.renewal_months) {
                                // No provable expiry: cannot be shown
                                // non-compliant.
                                None => None,
                                Some(expiry) => {
                                    let days = (expiry - today).num_days();
                                    if days > self.settings.expiry_horizon_days {
                                        None
                                    } else {
                                        let detail = if days <= 0 {
                                            format!("expired {} days ago", -days)
                                        } else {
                                            format!("expires in {days} days")
                                        };
                                        let mut task =
                                            self.new_task(req, TaskStatus::Open, detail);
                                        task.achieved_date = record.achieved;
                                        task.expiry_date = Some(expiry);
                                        task.days_until_expiry = Some(days);
                                        Some(task)
                                    }
                                }
                            }
                        }
                    }
                },
            };

            if let Some(task) = task {
                existing.entry(pair).or_default().push(task.status);
                tasks.push(task);
                tally.created += 1;
            }
        }
    }

    fn new_task(
        &self,
        req: &RequirementEntry,
        status: TaskStatus,
        detail: impl Into<String>,
    ) -> Task {
        let mut task = Task::new(
            req.employee.clone(),
            req.key.clone(),
            req.name.clone(),
            TaskType::Credential,
            self.clock,
        );
        task.status = status;
        task.detail = detail.into();
        task.strategic = req.strategic;
        task.comment = req.comment.clone();
        task.created_by = self.settings.created_by.clone();
        task
    }
}

fn is_retake_detail(detail: &str) -> bool {
    let d = detail.to_lowercase();
    d.contains("retake") || d.contains("re-enrollment")
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
