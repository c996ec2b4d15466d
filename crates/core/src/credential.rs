// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical credential matching keys.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Canonical matching key for a credential name.
///
/// Lowercase `[a-z0-9]` only. Produced by the engine's name normalizer; two
/// raw display names denoting the same real-world credential reduce to the
/// same key. The key — never the display string — is the join key for all
/// matching across sources.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct CredentialKey(SmolStr);

impl CredentialKey {
    /// Wrap an already-canonical string. Callers other than the normalizer
    /// should only do this with keys read back from storage.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(SmolStr::new(key.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CredentialKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for CredentialKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
