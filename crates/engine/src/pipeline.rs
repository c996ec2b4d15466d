// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pass orchestration.
//!
//! One `run` is a synchronous batch over fully materialized snapshots:
//! load everything, gate on the organizational unit, build the lookup
//! indexes, run the task state machine, dedupe, infer absences, strip
//! anything out of scope, persist. A pass never panics and never returns
//! an error — data problems surface as warnings on the outcome, and a
//! missing roster or requirement source aborts fail-closed with the
//! worklist untouched.

use crate::absence::detect_absences;
use crate::achievements::AchievementIndex;
use crate::dedupe::{dedupe_holdings, dedupe_requirements, dedupe_tasks};
use crate::enrollments::EnrollmentIndex;
use crate::normalize::{DisplayNames, NameNormalizer};
use crate::reconcile::Reconciler;
use crate::report::{ReconcileOutcome, Tally, Warnings};
use crate::requirements;
use crate::scope::OrgScope;
use crate::settings::ReconcileSettings;
use cw_adapters::WorklistSource;
use cw_core::Clock;

pub struct ReconcilePipeline<S, C: Clock> {
    source: S,
    settings: ReconcileSettings,
    clock: C,
}

impl<S: WorklistSource, C: Clock> ReconcilePipeline<S, C> {
    pub fn new(source: S, settings: ReconcileSettings, clock: C) -> Self {
        Self { source, settings, clock }
    }

    /// Run a full pass for the given unit and persist the result.
    pub fn run(&self, unit: Option<&str>) -> ReconcileOutcome {
        self.execute(unit, true)
    }

    /// Compute a pass without handing the result to the persistence
    /// collaborator. The outcome reports `persisted = false`.
    pub fn preview(&self, unit: Option<&str>) -> ReconcileOutcome {
        self.execute(unit, false)
    }

    fn execute(&self, unit: Option<&str>, persist: bool) -> ReconcileOutcome {
        let mut warnings = Warnings::new();

        let worklist = match self.source.load_worklist() {
            Ok(worklist) => worklist,
            Err(e) => {
                warnings.push(format!("worklist source unavailable, aborting pass: {e}"));
                return ReconcileOutcome::aborted(Vec::new(), warnings);
            }
        };

        // Fail-closed guards: without the roster or the requirement
        // catalog there is no eligibility data to reconcile against, and
        // generating tasks from a partial picture is worse than doing
        // nothing.
        let roster = match self.source.load_roster() {
            Ok(roster) if !roster.is_empty() => roster,
            Ok(_) => {
                warnings.push("roster is empty, aborting pass; worklist left untouched");
                return ReconcileOutcome::aborted(worklist, warnings);
            }
            Err(e) => {
                warnings.push(format!("roster unavailable, aborting pass: {e}"));
                return ReconcileOutcome::aborted(worklist, warnings);
            }
        };

        let mut requirement_rows = match self.source.load_requirements() {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) => {
                warnings
                    .push("requirement catalog is empty, aborting pass; worklist left untouched");
                return ReconcileOutcome::aborted(worklist, warnings);
            }
            Err(e) => {
                warnings.push(format!("requirement catalog unavailable, aborting pass: {e}"));
                return ReconcileOutcome::aborted(worklist, warnings);
            }
        };

        // The remaining feeds are enrichment: a failure degrades the pass
        // but does not abort it.
        let (results, holdings) = match self.source.load_achievement_sources() {
            Ok(feeds) => feeds,
            Err(e) => {
                warnings.push(format!("achievement sources unavailable, continuing without: {e}"));
                (Vec::new(), Vec::new())
            }
        };
        let enrollment_rows = match self.source.load_enrollments() {
            Ok(rows) => rows,
            Err(e) => {
                warnings.push(format!("enrollment feed unavailable, continuing without: {e}"));
                Vec::new()
            }
        };
        let translations = match self.source.load_translations() {
            Ok(map) => map,
            Err(e) => {
                warnings.push(format!("translation dictionary unavailable, continuing without: {e}"));
                Default::default()
            }
        };

        let normalizer = NameNormalizer::new(translations);
        let scope = OrgScope::build(&roster, unit);
        if scope.is_empty() {
            warnings.push(match unit {
                Some(u) => format!("unit '{u}' matched no active employees, nothing to reconcile"),
                None => "roster holds no active employees, nothing to reconcile".to_string(),
            });
            return ReconcileOutcome::aborted(worklist, warnings);
        }

        let reconciler = Reconciler::new(&self.settings, &self.clock);

        // Rows for other units pass through untouched; the pass only ever
        // computes against its own scope.
        let (mut tasks, remainder) = scope.split_tasks(worklist);
        reconciler.rekey_tasks(&mut tasks, &normalizer);

        requirements::rekey(&mut requirement_rows, &normalizer);
        let requirement_rows = dedupe_requirements(requirement_rows);
        let holdings = dedupe_holdings(holdings, &normalizer);
        let resolved = requirements::resolve(&requirement_rows, &scope, &mut warnings);

        let mut display_names = DisplayNames::new();
        let achievements = AchievementIndex::build(
            &results,
            &holdings,
            &normalizer,
            &scope,
            &mut display_names,
            &mut warnings,
        );
        let enrollments =
            EnrollmentIndex::build(&enrollment_rows, &normalizer, &scope, &mut warnings);

        tracing::info!(
            unit = unit.unwrap_or("<all>"),
            scope = scope.len(),
            requirements = resolved.len(),
            achievements = achievements.len(),
            enrollments = enrollments.len(),
            tasks = tasks.len(),
            "reconciliation pass starting"
        );

        let mut tally = Tally::default();
        reconciler.close_unrequired(&mut tasks, &requirement_rows, &mut tally);
        reconciler.close_for_inactive(&mut tasks, &roster, &mut tally);
        reconciler.apply_results(&mut tasks, &achievements, &resolved, &mut tally);
        reconciler.apply_enrollments(&mut tasks, &enrollments, &mut tally);
        reconciler.create_missing(&resolved, &achievements, &enrollments, &mut tasks, &mut tally);

        let mut tasks = dedupe_tasks(tasks);
        detect_absences(
            &mut tasks,
            &results,
            &normalizer,
            &self.clock,
            &self.settings,
            &mut tally,
        );

        // Defense in depth: scope was enforced at read and at write, and
        // is enforced once more on the rows about to be persisted.
        let (clean, leaked) = scope.split_tasks(tasks);
        for task in &leaked {
            warnings.push(format!(
                "refusing to persist out-of-scope task for employee '{}' ({})",
                task.employee, task.name
            ));
        }

        let mut merged = clean;
        merged.extend(remainder);

        let persisted = if persist {
            match self.source.persist_worklist(&merged) {
                Ok(mapping) => {
                    for task in &mut merged {
                        if let Some(assigned) = mapping.get(&task.id) {
                            task.id = assigned.clone();
                        }
                        task.persisted = true;
                    }
                    true
                }
                Err(e) => {
                    warnings.push(format!(
                        "persistence failed, computed worklist retained for retry: {e}"
                    ));
                    false
                }
            }
        } else {
            false
        };

        tracing::info!(
            created = tally.created,
            updated = tally.updated,
            closed = tally.closed,
            warnings = warnings.len(),
            persisted,
            "reconciliation pass finished"
        );

        ReconcileOutcome {
            tasks: merged,
            created: tally.created,
            updated: tally.updated,
            closed: tally.closed,
            persisted,
            warnings: warnings.into_vec(),
        }
    }

    /// Expose the normalizer for collaborators doing matching/search
    /// against the current translation dictionary.
    pub fn normalizer(&self) -> NameNormalizer {
        match self.source.load_translations() {
            Ok(map) => NameNormalizer::new(map),
            Err(e) => {
                tracing::warn!(error = %e, "translation dictionary unavailable, using bare normalizer");
                NameNormalizer::empty()
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
