// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cw_core::test_support::{date, employee, enrollment_row};

fn scope() -> OrgScope {
    OrgScope::build(&[employee("E-1", "B2")], Some("B2"))
}

#[test]
fn scoped_and_keyed() {
    let rows = vec![
        enrollment_row("E-1", "LS Schakelen", Some(date(2026, 4, 1)), "Gent"),
        enrollment_row("E-9", "LS Schakelen", Some(date(2026, 4, 1)), "Gent"),
    ];

    let mut warnings = Warnings::new();
    let index = EnrollmentIndex::build(&rows, &NameNormalizer::empty(), &scope(), &mut warnings);

    assert_eq!(index.len(), 1);
    let record = index.get(&"E-1".into(), &"laagspanningschakelen".into()).unwrap();
    assert_eq!(record.scheduled, Some(date(2026, 4, 1)));
    assert_eq!(record.location, "Gent");
    assert!(warnings.is_empty());
}

#[test]
fn duplicates_keep_latest_scheduled_date() {
    let rows = vec![
        enrollment_row("E-1", "HS", Some(date(2026, 3, 1)), "Gent"),
        enrollment_row("E-1", "Hoogspanning", Some(date(2026, 5, 1)), "Brussel"),
        enrollment_row("E-1", "HS", Some(date(2026, 4, 1)), "Antwerpen"),
    ];

    let index =
        EnrollmentIndex::build(&rows, &NameNormalizer::empty(), &scope(), &mut Warnings::new());

    let record = index.get(&"E-1".into(), &"hoogspanning".into()).unwrap();
    assert_eq!(record.scheduled, Some(date(2026, 5, 1)));
    assert_eq!(record.location, "Brussel");
}

#[test]
fn dated_enrollment_beats_undated() {
    let rows = vec![
        enrollment_row("E-1", "HS", None, ""),
        enrollment_row("E-1", "HS", Some(date(2026, 3, 1)), "Gent"),
    ];

    let index =
        EnrollmentIndex::build(&rows, &NameNormalizer::empty(), &scope(), &mut Warnings::new());

    assert_eq!(index.get(&"E-1".into(), &"hoogspanning".into()).unwrap().scheduled, Some(date(2026, 3, 1)));
}

#[test]
fn translated_names_key_to_the_dictionary_term() {
    let translations =
        [("Manoeuvres BT".to_string(), "LS Schakelen".to_string())].into_iter().collect();
    let normalizer = NameNormalizer::new(translations);
    let rows = vec![enrollment_row("E-1", "Manoeuvres BT", Some(date(2026, 4, 1)), "Namur")];

    let index = EnrollmentIndex::build(&rows, &normalizer, &scope(), &mut Warnings::new());

    let record = index.get(&"E-1".into(), &"laagspanningschakelen".into()).unwrap();
    assert_eq!(record.location, "Namur");
}

#[test]
fn malformed_rows_warn() {
    let rows = vec![enrollment_row("", "HS", None, ""), enrollment_row("E-1", "  ", None, "")];
    let mut warnings = Warnings::new();
    let index = EnrollmentIndex::build(&rows, &NameNormalizer::empty(), &scope(), &mut warnings);
    assert!(index.is_empty());
    assert_eq!(warnings.len(), 2);
}
