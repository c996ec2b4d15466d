// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tunable knobs for a reconciliation pass.

use serde::Deserialize;
use thiserror::Error;

/// Errors loading settings from a TOML document
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Pass configuration. Defaults match the policy the worklist has been
/// run with historically; override per deployment via a TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileSettings {
    /// A passed credential expiring within this many days needs a renewal
    /// task.
    pub expiry_horizon_days: i64,
    /// A session counts as over once its date is more than this many days
    /// in the past.
    pub session_grace_days: i64,
    /// Results this close to the session date are attributed to it when
    /// inferring absences.
    pub result_window_days: i64,
    /// Absence inference needs at least this many peers in one session.
    pub min_session_size: usize,
    /// Author stamp for tasks the reconciler creates.
    pub created_by: String,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        ReconcileSettings {
            expiry_horizon_days: 180,
            session_grace_days: 1,
            result_window_days: 7,
            min_session_size: 2,
            created_by: "certwatch".to_string(),
        }
    }
}

impl ReconcileSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
