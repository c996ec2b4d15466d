// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cw-engine: The certwatch reconciliation pipeline.
//!
//! One pass merges the roster, the requirement catalog, exam results,
//! current holdings and the scheduling feed into the unit's worklist:
//!
//! scope gate → lookup indexes → task state machine → dedup → absence
//! inference → scope strip → persistence handoff.

pub mod absence;
pub mod achievements;
pub mod dedupe;
pub mod enrollments;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod report;
pub mod requirements;
pub mod scope;
pub mod settings;

pub use absence::detect_absences;
pub use achievements::AchievementIndex;
pub use dedupe::{dedupe_holdings, dedupe_requirements, dedupe_tasks};
pub use enrollments::EnrollmentIndex;
pub use normalize::NameNormalizer;
pub use pipeline::ReconcilePipeline;
pub use reconcile::Reconciler;
pub use report::{ReconcileOutcome, Tally, Warnings};
pub use scope::OrgScope;
pub use settings::ReconcileSettings;
