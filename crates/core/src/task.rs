// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worklist tasks and their status state machine.

use crate::credential::CredentialKey;
use crate::employee::EmployeeId;
use crate::Clock;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Surrogate key for a worklist task.
    ///
    /// Generated locally when the reconciler creates a task; the
    /// persistence collaborator returns a temporary→persisted mapping on
    /// save. Loaded rows keep the id the store assigned them.
    pub struct TaskId("tsk-");
}

/// What kind of requirement the task tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// A formal certificate with exam results and expiry dates.
    #[serde(rename = "credential", alias = "Certificaat", alias = "certificaat")]
    Credential,
    /// A registered competence without a formal exam trail.
    #[serde(rename = "skill", alias = "Vaardigheid", alias = "vaardigheid")]
    Skill,
}

crate::simple_display! {
    TaskType {
        Credential => "credential",
        Skill => "skill",
    }
}

/// Task lifecycle status.
///
/// `Open → {Enrolled, NeedsRetake, Closed}`; `Closed` is the only terminal
/// state. `OnHold`, `Rejected` and `Absent` are sticky states set manually
/// or by the absence detector — the automatic reconciler never overwrites
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Open,
    Enrolled,
    Scheduled,
    Queued,
    NeedsRetake,
    OnHold,
    Rejected,
    Absent,
    RecentlyAchieved,
    Closed,
}

crate::simple_display! {
    TaskStatus {
        Open => "open",
        Enrolled => "enrolled",
        Scheduled => "scheduled",
        Queued => "queued",
        NeedsRetake => "needs_retake",
        OnHold => "on_hold",
        Rejected => "rejected",
        Absent => "absent",
        RecentlyAchieved => "recently_achieved",
        Closed => "closed",
    }
}

impl TaskStatus {
    /// Parse a status string, accepting both the canonical snake_case form
    /// and the wordings found in worklists written by the predecessor
    /// system.
    pub fn parse(raw: &str) -> Option<TaskStatus> {
        let s = raw.trim().to_lowercase();
        let status = match s.as_str() {
            "open" => TaskStatus::Open,
            "enrolled" | "ingeschreven" => TaskStatus::Enrolled,
            "scheduled" | "gepland" => TaskStatus::Scheduled,
            "queued" | "in wachtrij" => TaskStatus::Queued,
            "needs_retake" | "herkansing" => TaskStatus::NeedsRetake,
            "on_hold" | "on hold" => TaskStatus::OnHold,
            "rejected" | "geweigerd" => TaskStatus::Rejected,
            "absent" | "afwezig" | "afwezig (ziekte)" => TaskStatus::Absent,
            "recently_achieved" | "recent behaald" => TaskStatus::RecentlyAchieved,
            "closed" | "afgewerkt" | "gesloten" => TaskStatus::Closed,
            _ => return None,
        };
        Some(status)
    }

    /// Terminal statuses leave the task in the worklist as history only.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Closed)
    }

    /// The single source of truth for statuses the automatic reconciler
    /// must never overwrite or duplicate.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            TaskStatus::Enrolled
                | TaskStatus::Scheduled
                | TaskStatus::Queued
                | TaskStatus::OnHold
                | TaskStatus::RecentlyAchieved
                | TaskStatus::Closed
        )
    }

    /// Sticky manually-set states skipped by every automatic update pass.
    pub fn is_sticky(&self) -> bool {
        matches!(self, TaskStatus::OnHold | TaskStatus::Rejected | TaskStatus::Absent)
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TaskStatus::parse(&s).ok_or_else(|| {
            serde::de::Error::unknown_variant(
                &s,
                &["open", "enrolled", "scheduled", "queued", "needs_retake", "on_hold", "rejected", "absent", "recently_achieved", "closed"],
            )
        })
    }
}

fn default_true() -> bool {
    true
}

/// One row of the worklist — the principal mutable entity of the system.
///
/// At most one active (non-closed) task may exist per
/// (employee, key, task_type); the deduplication engine enforces it and
/// the reconciler's existence checks respect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Whether `id` was assigned by the persistence collaborator. Fresh
    /// rows carry a generated temporary id until the first save.
    #[serde(default)]
    pub persisted: bool,
    pub employee: EmployeeId,
    #[serde(default)]
    pub key: CredentialKey,
    pub name: String,
    pub task_type: TaskType,
    pub status: TaskStatus,
    /// Free-text annotation explaining the status ("expires in 12 days",
    /// "confirmed by scheduler", ...).
    #[serde(default)]
    pub detail: String,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub strategic: bool,
    #[serde(default)]
    pub enrolled_date: Option<NaiveDate>,
    #[serde(default)]
    pub enrolled_location: Option<String>,
    #[serde(default)]
    pub achieved_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub days_until_expiry: Option<i64>,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
}

impl Task {
    /// A fresh Open task with a generated temporary id.
    pub fn new(
        employee: EmployeeId,
        key: CredentialKey,
        name: impl Into<String>,
        task_type: TaskType,
        clock: &impl Clock,
    ) -> Self {
        let now = clock.now();
        Task {
            id: TaskId::new(),
            persisted: false,
            employee,
            key,
            name: name.into(),
            task_type,
            status: TaskStatus::Open,
            detail: String::new(),
            required: true,
            strategic: false,
            enrolled_date: None,
            enrolled_location: None,
            achieved_date: None,
            expiry_date: None,
            days_until_expiry: None,
            comment: String::new(),
            created_at: now,
            updated_at: now,
            created_by: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Move the task to a new status with an explanatory detail, stamping
    /// the update time.
    pub fn transition(
        &mut self,
        status: TaskStatus,
        detail: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.status = status;
        self.detail = detail.into();
        self.updated_at = now;
    }
}

crate::builder! {
    pub struct TaskBuilder => Task {
        into {
            id: TaskId = TaskId::new(),
            employee: EmployeeId = "E-1",
            key: CredentialKey = "",
            name: String = "Test Credential",
            detail: String = "",
            comment: String = "",
            created_by: String = "test",
        }
        set {
            persisted: bool = false,
            task_type: TaskType = TaskType::Credential,
            status: TaskStatus = TaskStatus::Open,
            required: bool = true,
            strategic: bool = false,
            days_until_expiry: Option<i64> = None,
            created_at: DateTime<Utc> = DateTime::<Utc>::default(),
            updated_at: DateTime<Utc> = DateTime::<Utc>::default(),
        }
        option {
            enrolled_date: NaiveDate = None,
            enrolled_location: String = None,
            achieved_date: NaiveDate = None,
            expiry_date: NaiveDate = None,
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
