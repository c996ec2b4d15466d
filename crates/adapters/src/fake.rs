// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory source for tests, with failure injection and persist capture.

use crate::source::{IdMapping, SourceError, WorklistSource};
use cw_core::{Employee, EnrollmentRow, HoldingRow, RequirementEntry, ResultRow, Task, TaskId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct FakeState {
    roster: Vec<Employee>,
    requirements: Vec<RequirementEntry>,
    results: Vec<ResultRow>,
    holdings: Vec<HoldingRow>,
    enrollments: Vec<EnrollmentRow>,
    worklist: Vec<Task>,
    translations: HashMap<String, String>,
    fail_roster: bool,
    fail_requirements: bool,
    fail_persist: bool,
    persisted: Vec<Vec<Task>>,
}

/// Shareable fake collaborator. Clones see the same state.
#[derive(Clone, Default)]
pub struct FakeSource {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(self, roster: Vec<Employee>) -> Self {
        self.state.lock().roster = roster;
        self
    }

    pub fn with_requirements(self, requirements: Vec<RequirementEntry>) -> Self {
        self.state.lock().requirements = requirements;
        self
    }

    pub fn with_results(self, results: Vec<ResultRow>) -> Self {
        self.state.lock().results = results;
        self
    }

    pub fn with_holdings(self, holdings: Vec<HoldingRow>) -> Self {
        self.state.lock().holdings = holdings;
        self
    }

    pub fn with_enrollments(self, enrollments: Vec<EnrollmentRow>) -> Self {
        self.state.lock().enrollments = enrollments;
        self
    }

    pub fn with_worklist(self, worklist: Vec<Task>) -> Self {
        self.state.lock().worklist = worklist;
        self
    }

    pub fn with_translations(self, translations: HashMap<String, String>) -> Self {
        self.state.lock().translations = translations;
        self
    }

    /// Make `load_roster` fail with `SourceError::Unavailable`.
    pub fn fail_roster(self) -> Self {
        self.state.lock().fail_roster = true;
        self
    }

    /// Make `load_requirements` fail with `SourceError::Unavailable`.
    pub fn fail_requirements(self) -> Self {
        self.state.lock().fail_requirements = true;
        self
    }

    /// Make `persist_worklist` fail with `SourceError::Persistence`.
    pub fn fail_persist(self) -> Self {
        self.state.lock().fail_persist = true;
        self
    }

    /// Worklists captured by successful persist calls, oldest first.
    pub fn persisted(&self) -> Vec<Vec<Task>> {
        self.state.lock().persisted.clone()
    }

    /// The most recently persisted worklist, if any.
    pub fn last_persisted(&self) -> Option<Vec<Task>> {
        self.state.lock().persisted.last().cloned()
    }
}

impl WorklistSource for FakeSource {
    fn load_roster(&self) -> Result<Vec<Employee>, SourceError> {
        let state = self.state.lock();
        if state.fail_roster {
            return Err(SourceError::unavailable("roster", "injected failure"));
        }
        Ok(state.roster.clone())
    }

    fn load_requirements(&self) -> Result<Vec<RequirementEntry>, SourceError> {
        let state = self.state.lock();
        if state.fail_requirements {
            return Err(SourceError::unavailable("requirements", "injected failure"));
        }
        Ok(state.requirements.clone())
    }

    fn load_achievement_sources(
        &self,
    ) -> Result<(Vec<ResultRow>, Vec<HoldingRow>), SourceError> {
        let state = self.state.lock();
        Ok((state.results.clone(), state.holdings.clone()))
    }

    fn load_enrollments(&self) -> Result<Vec<EnrollmentRow>, SourceError> {
        Ok(self.state.lock().enrollments.clone())
    }

    fn load_worklist(&self) -> Result<Vec<Task>, SourceError> {
        Ok(self.state.lock().worklist.clone())
    }

    fn load_translations(&self) -> Result<HashMap<String, String>, SourceError> {
        Ok(self.state.lock().translations.clone())
    }

    fn persist_worklist(&self, tasks: &[Task]) -> Result<IdMapping, SourceError> {
        let mut state = self.state.lock();
        if state.fail_persist {
            return Err(SourceError::Persistence("injected failure".to_string()));
        }
        let mapping: IdMapping = tasks
            .iter()
            .filter(|t| !t.persisted)
            .map(|t| {
                let suffix = t.id.as_str().strip_prefix(TaskId::PREFIX).unwrap_or(t.id.as_str());
                (t.id.clone(), TaskId::from_string(format!("tsk-db-{suffix}")))
            })
            .collect();
        state.persisted.push(tasks.to_vec());
        state.worklist = tasks.to_vec();
        Ok(mapping)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
