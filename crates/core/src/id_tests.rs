// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::task::TaskId;

#[test]
fn generated_id_carries_prefix() {
    let id = TaskId::new();
    assert!(id.as_str().starts_with("tsk-"));
    assert_eq!(id.as_str().len(), 23);
}

#[test]
fn generated_ids_are_unique() {
    let a = TaskId::new();
    let b = TaskId::new();
    assert_ne!(a, b);
}

#[test]
fn id_from_string_round_trips() {
    let id = TaskId::from_string("tsk-persisted-000000001");
    assert_eq!(id.to_string(), "tsk-persisted-000000001");

    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"tsk-persisted-000000001\"");
    let parsed: TaskId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn id_compares_against_str() {
    let id = TaskId::from_string("tsk-x");
    assert_eq!(id, "tsk-x");
    assert!(!id.is_empty());
}
