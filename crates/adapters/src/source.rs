// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The collaborator trait the reconciliation engine consumes.

use cw_core::{
    Employee, EnrollmentRow, HoldingRow, RequirementEntry, ResultRow, Task, TaskId,
};
use std::collections::HashMap;
use thiserror::Error;

/// Temporary→persisted id mapping returned by a successful save.
pub type IdMapping = HashMap<TaskId, TaskId>;

/// Errors crossing the collaborator boundary
#[derive(Debug, Error)]
pub enum SourceError {
    /// The whole source failed or is missing. Fatal to the pass: the
    /// engine aborts fail-closed rather than reconcile against incomplete
    /// eligibility data.
    #[error("{name} source unavailable: {reason}")]
    Unavailable { name: &'static str, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("persistence rejected worklist: {0}")]
    Persistence(String),
}

impl SourceError {
    pub fn unavailable(name: &'static str, reason: impl Into<String>) -> Self {
        SourceError::Unavailable { name, reason: reason.into() }
    }
}

/// Data sources and sinks for one reconciliation pass.
///
/// Implementations hand the engine fully materialized snapshots — the
/// pipeline deliberately avoids streaming because correctness depends on
/// seeing the complete picture (the protected-status guard needs the full
/// worklist). All methods are synchronous: a pass is a short, in-memory
/// batch computation.
pub trait WorklistSource {
    fn load_roster(&self) -> Result<Vec<Employee>, SourceError>;

    fn load_requirements(&self) -> Result<Vec<RequirementEntry>, SourceError>;

    /// Historical exam results and the current-holdings overview.
    fn load_achievement_sources(&self)
        -> Result<(Vec<ResultRow>, Vec<HoldingRow>), SourceError>;

    fn load_enrollments(&self) -> Result<Vec<EnrollmentRow>, SourceError>;

    fn load_worklist(&self) -> Result<Vec<Task>, SourceError>;

    /// Raw→canonical display-term dictionary for the name normalizer,
    /// refreshed once per pass.
    fn load_translations(&self) -> Result<HashMap<String, String>, SourceError>;

    /// Replace-and-merge the unit's worklist rows. Must be idempotent:
    /// the engine retries with the exact same computed state after a
    /// failure.
    fn persist_worklist(&self, tasks: &[Task]) -> Result<IdMapping, SourceError>;
}
