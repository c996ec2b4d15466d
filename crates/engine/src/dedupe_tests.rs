// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{TimeZone, Utc};
use cw_core::test_support::{date, holding_row};
use cw_core::{RequirementEntry, TaskStatus, TaskType};

fn at(day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap()
}

#[test]
fn persisted_row_beats_newer_unpersisted() {
    let persisted = Task::builder()
        .id("tsk-db-1")
        .employee("E-1")
        .key("hoogspanning")
        .persisted(true)
        .updated_at(at(1))
        .build();
    let newer = Task::builder()
        .employee("E-1")
        .key("hoogspanning")
        .updated_at(at(20))
        .build();

    let kept = dedupe_tasks(vec![persisted, newer]);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id.as_str(), "tsk-db-1");
}

#[test]
fn most_recent_update_wins_among_unpersisted() {
    let older = Task::builder().employee("E-1").key("k").updated_at(at(1)).detail("old").build();
    let newer = Task::builder().employee("E-1").key("k").updated_at(at(5)).detail("new").build();

    let kept = dedupe_tasks(vec![older, newer]);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].detail, "new");
}

#[test]
fn created_at_breaks_full_ties() {
    let older = Task::builder().employee("E-1").key("k").created_at(at(1)).detail("old").build();
    let newer = Task::builder().employee("E-1").key("k").created_at(at(5)).detail("new").build();

    let kept = dedupe_tasks(vec![older, newer]);
    assert_eq!(kept[0].detail, "new");
}

#[test]
fn different_status_rows_both_survive() {
    let open = Task::builder().employee("E-1").key("k").status(TaskStatus::Open).build();
    let closed = Task::builder().employee("E-1").key("k").status(TaskStatus::Closed).build();

    assert_eq!(dedupe_tasks(vec![open, closed]).len(), 2);
}

#[test]
fn different_task_types_both_survive() {
    let credential = Task::builder().employee("E-1").key("k").build();
    let skill = Task::builder().employee("E-1").key("k").task_type(TaskType::Skill).build();

    assert_eq!(dedupe_tasks(vec![credential, skill]).len(), 2);
}

#[test]
fn unrelated_rows_keep_input_order() {
    let a = Task::builder().employee("E-1").key("a").build();
    let b = Task::builder().employee("E-2").key("b").build();
    let c = Task::builder().employee("E-3").key("c").build();

    let kept = dedupe_tasks(vec![a, b, c]);
    let keys: Vec<&str> = kept.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, ["a", "b", "c"]);
}

#[test]
fn requirement_duplicates_keep_latest_modified() {
    let old = RequirementEntry::builder()
        .employee("E-1")
        .key("hoogspanning")
        .comment("old")
        .modified_at(Some(at(1)))
        .build();
    let new = RequirementEntry::builder()
        .employee("E-1")
        .key("hoogspanning")
        .comment("new")
        .modified_at(Some(at(9)))
        .build();

    let kept = dedupe_requirements(vec![old, new]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].comment, "new");
}

#[test]
fn holding_duplicates_keep_latest_expiry() {
    let rows = vec![
        holding_row("E-1", "HS", Some(date(2024, 1, 1)), Some(date(2027, 1, 1))),
        holding_row("E-1", "Hoogspanning", Some(date(2025, 1, 1)), Some(date(2026, 1, 1))),
    ];

    let kept = dedupe_holdings(rows, &NameNormalizer::empty());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].expires, Some(date(2027, 1, 1)));
}
