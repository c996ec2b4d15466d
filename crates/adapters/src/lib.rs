// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cw-adapters: Collaborator boundary for the certwatch reconciler.
//!
//! The engine consumes fully materialized snapshots through the
//! [`WorklistSource`] trait. This crate provides the trait, a JSON
//! snapshot-directory implementation for operational use, and an
//! in-memory fake for tests (behind the `test-support` feature).

pub mod json;
pub mod source;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSource;
pub use json::JsonDirSource;
pub use source::{IdMapping, SourceError, WorklistSource};
