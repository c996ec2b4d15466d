// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level scenarios: full passes over the fake collaborator.

use cw_adapters::FakeSource;
use cw_core::test_support::{date, employee, enrollment_row, result_row};
use cw_core::{
    FakeClock, RequirementEntry, Task, TaskStatus, TaskType,
};
use cw_engine::{ReconcilePipeline, ReconcileSettings};
use std::collections::HashMap;

const TODAY: (i32, u32, u32) = (2026, 3, 2);

fn clock() -> FakeClock {
    FakeClock::on(date(TODAY.0, TODAY.1, TODAY.2))
}

fn pipeline(source: FakeSource) -> ReconcilePipeline<FakeSource, FakeClock> {
    ReconcilePipeline::new(source, ReconcileSettings::default(), clock())
}

fn requirement(employee: &str, name: &str) -> RequirementEntry {
    RequirementEntry::builder().employee(employee).name(name).build()
}

/// A required credential with no achievement, no enrollment and no
/// existing task yields exactly one new Open task.
#[test]
fn never_achieved_requirement_yields_one_open_task() {
    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2")])
        .with_requirements(vec![requirement("E-1", "HS-TEST")]);

    let outcome = pipeline(source.clone()).run(Some("B2"));

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.tasks.len(), 1);
    let task = &outcome.tasks[0];
    assert_eq!(task.status, TaskStatus::Open);
    assert_eq!(task.detail, "never achieved");
    assert!(task.required);

    let persisted = source.last_persisted().unwrap();
    assert_eq!(persisted.len(), 1);
}

/// A passed credential expiring in 10 days yields a countdown task.
#[test]
fn soon_expiring_credential_yields_countdown_task() {
    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2")])
        .with_requirements(vec![requirement("E-1", "Hoogspanning")])
        .with_results(vec![result_row(
            "E-1",
            "Hoogspanning",
            "Geslaagd",
            Some(date(2023, 3, 12)),
            Some(date(2026, 3, 12)),
        )]);

    let outcome = pipeline(source).run(Some("B2"));

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.tasks[0].detail, "expires in 10 days");
    assert_eq!(outcome.tasks[0].days_until_expiry, Some(10));
}

/// A credential with 200 days of validity left needs no task, and a
/// closed task for it is not resurrected.
#[test]
fn long_valid_credential_yields_no_task() {
    let results = vec![result_row(
        "E-1",
        "Hoogspanning",
        "Geslaagd",
        Some(date(2024, 9, 18)),
        Some(date(2026, 9, 18)),
    )];

    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2")])
        .with_requirements(vec![requirement("E-1", "Hoogspanning")])
        .with_results(results.clone());
    let outcome = pipeline(source).run(Some("B2"));
    assert_eq!(outcome.created, 0);
    assert!(outcome.tasks.is_empty());

    // Same inputs, but a previously closed task already in the store.
    let closed = Task::builder()
        .employee("E-1")
        .key("hoogspanning")
        .name("Hoogspanning")
        .status(TaskStatus::Closed)
        .persisted(true)
        .build();
    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2")])
        .with_requirements(vec![requirement("E-1", "Hoogspanning")])
        .with_results(results)
        .with_worklist(vec![closed]);
    let outcome = pipeline(source).run(Some("B2"));
    assert_eq!(outcome.created, 0);
    assert_eq!(outcome.tasks.len(), 1);
    assert_eq!(outcome.tasks[0].status, TaskStatus::Closed);
}

/// An enrollment next week beats a failed record from last month: the
/// produced task is Enrolled.
#[test]
fn enrollment_overrides_failed_achievement() {
    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2")])
        .with_requirements(vec![requirement("E-1", "Hoogspanning")])
        .with_results(vec![result_row(
            "E-1",
            "Hoogspanning",
            "Niet geslaagd",
            Some(date(2026, 2, 1)),
            None,
        )])
        .with_enrollments(vec![enrollment_row(
            "E-1",
            "Hoogspanning",
            Some(date(2026, 3, 9)),
            "Gent",
        )]);

    let outcome = pipeline(source).run(Some("B2"));

    assert_eq!(outcome.tasks.len(), 1);
    let task = &outcome.tasks[0];
    assert_eq!(task.status, TaskStatus::Enrolled);
    assert_eq!(task.enrolled_date, Some(date(2026, 3, 9)));
}

/// Two peers enrolled five days ago; one has a result, the other does
/// not. The silent one becomes Absent, the achiever Closed.
#[test]
fn absent_peer_is_detected_after_the_session() {
    let session = date(2026, 2, 25);
    let enrolled = |id: &str| {
        Task::builder()
            .employee(id)
            .key("hoogspanning")
            .name("Hoogspanning")
            .status(TaskStatus::Enrolled)
            .enrolled_date(session)
            .persisted(true)
            .build()
    };

    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2"), employee("E-2", "B2")])
        .with_requirements(vec![
            requirement("E-1", "Hoogspanning"),
            requirement("E-2", "Hoogspanning"),
        ])
        .with_results(vec![result_row(
            "E-1",
            "Hoogspanning",
            "Geslaagd",
            Some(session),
            Some(date(2029, 2, 25)),
        )])
        .with_worklist(vec![enrolled("E-1"), enrolled("E-2")]);

    let outcome = pipeline(source).run(Some("B2"));

    let by_employee: HashMap<&str, &Task> =
        outcome.tasks.iter().map(|t| (t.employee.as_str(), t)).collect();
    assert_eq!(by_employee["E-1"].status, TaskStatus::Closed);
    assert!(by_employee["E-1"].detail.starts_with("achieved on"));
    assert_eq!(by_employee["E-2"].status, TaskStatus::Absent);
    assert!(by_employee["E-2"].detail.contains("2026-02-25"));
}

/// Duplicate rows for one (employee, credential, type): the persisted
/// row survives even against a newer unpersisted one.
#[test]
fn dedup_prefers_the_persisted_row() {
    let persisted = Task::builder()
        .id("tsk-db-42")
        .employee("E-1")
        .key("hoogspanning")
        .name("Hoogspanning")
        .persisted(true)
        .updated_at(chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap())
        .build();
    let newer_duplicate = Task::builder()
        .employee("E-1")
        .key("hoogspanning")
        .name("Hoogspanning")
        .updated_at(chrono::DateTime::from_timestamp(1_768_000_000, 0).unwrap())
        .build();

    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2")])
        .with_requirements(vec![requirement("E-1", "Hoogspanning")])
        .with_worklist(vec![persisted, newer_duplicate]);

    let outcome = pipeline(source).run(Some("B2"));

    assert_eq!(outcome.tasks.len(), 1);
    assert_eq!(outcome.tasks[0].id.as_str(), "tsk-db-42");
}

/// At-most-one-active-task invariant, checked across a busy pass.
#[test]
fn at_most_one_active_task_per_pair() {
    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2"), employee("E-2", "B2")])
        .with_requirements(vec![
            requirement("E-1", "Hoogspanning"),
            requirement("E-1", "VCA Basis"),
            requirement("E-2", "Hoogspanning"),
        ])
        .with_results(vec![result_row("E-1", "HS", "Niet geslaagd", Some(date(2026, 2, 1)), None)])
        .with_enrollments(vec![enrollment_row("E-2", "HS", Some(date(2026, 4, 1)), "Gent")])
        .with_worklist(vec![
            Task::builder().employee("E-1").key("hoogspanning").name("Hoogspanning").persisted(true).build(),
            Task::builder().employee("E-1").key("hoogspanning").name("HS").build(),
        ]);

    let outcome = pipeline(source).run(Some("B2"));

    let mut active: HashMap<(String, String, TaskType), usize> = HashMap::new();
    for task in outcome.tasks.iter().filter(|t| t.is_active()) {
        *active
            .entry((
                task.employee.as_str().to_string(),
                task.key.as_str().to_string(),
                task.task_type,
            ))
            .or_default() += 1;
    }
    assert!(active.values().all(|&n| n <= 1), "duplicate active tasks: {active:?}");
}

/// Scope containment: a pass for B2 creates nothing for other units and
/// leaves their stored rows untouched.
#[test]
fn scoped_pass_never_touches_other_units() {
    let foreign = Task::builder()
        .employee("E-9")
        .key("vcabasis")
        .name("VCA Basis")
        .status(TaskStatus::Open)
        .detail("belongs to B3")
        .persisted(true)
        .build();

    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2"), employee("E-9", "B3")])
        .with_requirements(vec![
            requirement("E-1", "Hoogspanning"),
            requirement("E-9", "VCA Basis"),
        ])
        .with_worklist(vec![foreign.clone()]);

    let outcome = pipeline(source).run(Some("B2"));

    // Created work is for the scoped unit only.
    assert_eq!(outcome.created, 1);
    let created: Vec<_> = outcome.tasks.iter().filter(|t| !t.persisted || t.id != foreign.id).collect();
    assert!(created.iter().all(|t| t.employee.as_str() != "E-9" || t.detail == "belongs to B3"));

    // The foreign row rode along unmodified.
    let kept = outcome.tasks.iter().find(|t| t.employee.as_str() == "E-9").unwrap();
    assert_eq!(kept.detail, "belongs to B3");
    assert_eq!(kept.status, TaskStatus::Open);
}

/// Fail-closed: a failing roster source aborts the pass, keeps the
/// worklist byte-identical and reports a warning.
#[test]
fn missing_roster_fails_closed() {
    let existing = Task::builder()
        .employee("E-1")
        .key("hoogspanning")
        .name("Hoogspanning")
        .persisted(true)
        .build();
    let source = FakeSource::new()
        .with_worklist(vec![existing.clone()])
        .with_requirements(vec![requirement("E-1", "Hoogspanning")])
        .fail_roster();

    let outcome = pipeline(source.clone()).run(Some("B2"));

    assert_eq!(outcome.tasks, vec![existing]);
    assert!(!outcome.warnings.is_empty());
    assert!(source.persisted().is_empty());
}

/// Synonym equivalence end to end: a requirement named in French matches
/// a Dutch-named achievement through the shared canonical key.
#[test]
fn synonyms_match_across_feeds() {
    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2")])
        .with_requirements(vec![requirement("E-1", "Basse Tension")])
        .with_results(vec![result_row(
            "E-1",
            "Laagspanning",
            "Geslaagd",
            Some(date(2024, 1, 1)),
            Some(date(2030, 1, 1)),
        )]);

    let outcome = pipeline(source).run(Some("B2"));

    // The French-named requirement is satisfied by the Dutch-named pass.
    assert_eq!(outcome.created, 0);
    assert!(outcome.tasks.is_empty());
}

/// A second identical pass is a no-op: same worklist, nothing created.
#[test]
fn reconciliation_is_idempotent_across_passes() {
    let source = FakeSource::new()
        .with_roster(vec![employee("E-1", "B2")])
        .with_requirements(vec![requirement("E-1", "Hoogspanning")])
        .with_enrollments(vec![enrollment_row(
            "E-1",
            "Hoogspanning",
            Some(date(2026, 4, 1)),
            "Gent",
        )]);

    let pipeline = pipeline(source.clone());
    let first = pipeline.run(Some("B2"));
    assert_eq!(first.created, 1);

    let second = pipeline.run(Some("B2"));
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.tasks.len(), 1);
}
