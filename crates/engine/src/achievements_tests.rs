// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cw_core::test_support::{date, employee, holding_row, result_row};

fn scope() -> OrgScope {
    OrgScope::build(&[employee("E-1", "B2"), employee("E-2", "B2")], Some("B2"))
}

fn build(results: &[ResultRow], holdings: &[HoldingRow]) -> (AchievementIndex, Warnings) {
    let mut warnings = Warnings::new();
    let mut names = DisplayNames::new();
    let index = AchievementIndex::build(
        results,
        holdings,
        &NameNormalizer::empty(),
        &scope(),
        &mut names,
        &mut warnings,
    );
    (index, warnings)
}

#[test]
fn merges_both_feeds_under_one_key() {
    let results = vec![result_row("E-1", "LS Schakelen", "Geslaagd", Some(date(2025, 6, 1)), None)];
    let holdings =
        vec![holding_row("E-1", "Laagspanning Schakelen", Some(date(2025, 6, 1)), Some(date(2028, 6, 1)))];

    let (index, warnings) = build(&results, &holdings);

    assert_eq!(index.len(), 1);
    let record = index.get(&"E-1".into(), &"laagspanningschakelen".into()).unwrap();
    // The holding carries an expiry, so it wins over the bare result.
    assert_eq!(record.source, AchievementSource::Holdings);
    assert_eq!(record.expires, Some(date(2028, 6, 1)));
    assert!(warnings.is_empty());
}

#[test]
fn later_expiry_wins_over_recency() {
    let results = vec![
        result_row("E-1", "HS", "Geslaagd", Some(date(2024, 1, 1)), Some(date(2029, 1, 1))),
        result_row("E-1", "HS", "Geslaagd", Some(date(2026, 1, 1)), Some(date(2027, 1, 1))),
    ];

    let (index, _) = build(&results, &[]);

    let record = index.get(&"E-1".into(), &"hoogspanning".into()).unwrap();
    assert_eq!(record.expires, Some(date(2029, 1, 1)));
    assert_eq!(record.achieved, Some(date(2024, 1, 1)));
}

#[test]
fn achieved_recency_decides_without_expiries() {
    let results = vec![
        result_row("E-1", "VCA Basis", "Niet geslaagd", Some(date(2026, 2, 1)), None),
        result_row("E-1", "VCA Basis", "Geslaagd", Some(date(2026, 1, 1)), None),
    ];

    let (index, _) = build(&results, &[]);

    let record = index.get(&"E-1".into(), &"vcabasis".into()).unwrap();
    assert_eq!(record.outcome, Outcome::Failed);
    assert_eq!(record.achieved, Some(date(2026, 2, 1)));
}

#[test]
fn out_of_scope_rows_are_silently_skipped() {
    let results = vec![result_row("E-9", "HS", "Geslaagd", Some(date(2026, 1, 1)), None)];
    let (index, warnings) = build(&results, &[]);
    assert!(index.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn malformed_rows_warn_and_continue() {
    let results = vec![
        result_row("", "HS", "Geslaagd", None, None),
        result_row("E-1", "", "Geslaagd", None, None),
        result_row("E-1", "HS", "Geslaagd", None, None),
    ];

    let (index, warnings) = build(&results, &[]);

    assert_eq!(index.len(), 1);
    assert_eq!(warnings.len(), 2);
}

#[test]
fn ambiguous_display_names_are_surfaced() {
    let results = vec![
        result_row("E-1", "Laagspanning", "Geslaagd", None, None),
        result_row("E-2", "Basse Tension", "Geslaagd", None, None),
    ];

    let (_, warnings) = build(&results, &[]);
    assert_eq!(warnings.len(), 1);
    assert!(warnings.as_slice()[0].contains("ambiguous"));
}

#[yare::parameterized(
    recorded_expiry      = { Some((2027, 1, 1)), Some((2025, 1, 1)), Some(24), Some((2027, 1, 1)) },
    derived_from_renewal = { None, Some((2025, 1, 15)), Some(36), Some((2028, 1, 15)) },
    no_renewal_interval  = { None, Some((2025, 1, 1)), None, None },
    no_achieved_date     = { None, None, Some(12), None },
)]
fn effective_expiry_cases(
    expires: Option<(i32, u32, u32)>,
    achieved: Option<(i32, u32, u32)>,
    renewal_months: Option<u32>,
    expected: Option<(i32, u32, u32)>,
) {
    let to_date = |t: Option<(i32, u32, u32)>| t.map(|(y, m, d)| date(y, m, d));
    let record = AchievementRecord {
        outcome: Outcome::Passed,
        achieved: to_date(achieved),
        expires: to_date(expires),
        source: AchievementSource::Results,
    };
    assert_eq!(effective_expiry(&record, renewal_months), to_date(expected));
}
