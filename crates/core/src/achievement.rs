// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Achievement inputs and the merged best-known-state record.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Expiry dates in this year or later mean "unlimited validity" and are
/// exempt from any expiry-horizon computation. Convention inherited from
/// the upstream credential registry.
pub const UNLIMITED_VALIDITY_YEAR: i32 = 2099;

/// Classified outcome of an exam/holding row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed,
    /// No usable outcome recorded (blank, unknown wording, still awaiting
    /// results).
    Pending,
}

crate::simple_display! {
    Outcome {
        Passed => "passed",
        Failed => "failed",
        Pending => "pending",
    }
}

/// Legacy status wordings accepted as a pass. The feeds mix English and
/// Dutch freely.
const PASSING: &[&str] = &["passed", "geslaagd", "certified", "behaald", "ok", "voldoende"];

const FAILING: &[&str] = &[
    "failed",
    "not certified",
    "niet geslaagd",
    "gefaald",
    "gezakt",
    "mislukt",
    "onvoldoende",
];

impl Outcome {
    /// Classify a raw status string from any achievement source.
    /// Unknown wordings and blanks are [`Outcome::Pending`].
    pub fn classify(raw: &str) -> Outcome {
        let s = raw.trim().to_lowercase();
        if PASSING.contains(&s.as_str()) {
            Outcome::Passed
        } else if FAILING.contains(&s.as_str()) {
            Outcome::Failed
        } else {
            Outcome::Pending
        }
    }
}

/// Raw exam-result row from the results feed. Names are raw display
/// strings; the engine normalizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub achieved: Option<NaiveDate>,
    #[serde(default)]
    pub expires: Option<NaiveDate>,
}

/// Raw current-holdings row from the credential overview. Carries no
/// status column; a listed holding implies a passed outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRow {
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub issued: Option<NaiveDate>,
    #[serde(default)]
    pub expires: Option<NaiveDate>,
}

/// Which feed a merged record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementSource {
    Results,
    Holdings,
}

crate::simple_display! {
    AchievementSource {
        Results => "results",
        Holdings => "holdings",
    }
}

/// Best known achievement state for one (employee, credential) pair.
///
/// Ephemeral — rebuilt every reconciliation pass, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementRecord {
    pub outcome: Outcome,
    pub achieved: Option<NaiveDate>,
    pub expires: Option<NaiveDate>,
    pub source: AchievementSource,
}

impl AchievementRecord {
    /// Whether the expiry date encodes unlimited validity.
    pub fn is_unlimited(&self) -> bool {
        self.expires.is_some_and(|d| d.year() >= UNLIMITED_VALIDITY_YEAR)
    }

    /// Replacement rule for merging raw rows into the best-known record:
    /// a later expiry always wins; achieved recency only breaks ties when
    /// neither side has an expiry. Expiry is the operative fact for
    /// compliance, achieved date a fallback signal.
    pub fn is_better_than(&self, current: &AchievementRecord) -> bool {
        match (self.expires, current.expires) {
            (Some(candidate), Some(incumbent)) => candidate > incumbent,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => match (self.achieved, current.achieved) {
                (Some(candidate), Some(incumbent)) => candidate > incumbent,
                (Some(_), None) => true,
                _ => false,
            },
        }
    }
}

#[cfg(test)]
#[path = "achievement_tests.rs"]
mod tests;
