// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential name normalization.
//!
//! Every feed spells credential names differently — French vs Dutch
//! terms, voltage abbreviations, vendor prefixes, stray punctuation. This
//! module reduces any spelling to one canonical matching key. The pass
//! order is fixed and nothing elsewhere is allowed to add ad hoc
//! substitutions.

use cw_core::CredentialKey;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Word-bounded low-voltage abbreviations (Dutch LS, French BT).
#[allow(clippy::expect_used)]
static LOW_VOLTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(LS|BT)\b").expect("constant regex pattern is valid")
});

/// Word-bounded high-voltage abbreviations (Dutch HS, French HT).
#[allow(clippy::expect_used)]
static HIGH_VOLTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(HS|HT)\b").expect("constant regex pattern is valid")
});

/// French full phrases and their Dutch canonical terms. Substituted
/// before the abbreviation regexes run: "BASSE TENSION" must become
/// "LAAGSPANNING" as a unit, or the BT regex would corrupt it halfway.
const PHRASES: &[(&str, &str)] = &[
    ("BASSE TENSION", "LAAGSPANNING"),
    ("HAUTE TENSION", "HOOGSPANNING"),
    ("MANOEUVRES", "SCHAKELEN"),
];

/// Legacy vendor token scrubbed from keys.
const VENDOR_TOKEN: &str = "equans";

/// Canonicalizes free-text credential names into stable matching keys.
///
/// Deterministic, pure and total: empty input yields the empty key.
/// The translation dictionary is an external collaborator, refreshed once
/// per reconciliation pass.
#[derive(Debug, Default, Clone)]
pub struct NameNormalizer {
    translations: HashMap<String, String>,
}

impl NameNormalizer {
    pub fn new(translations: HashMap<String, String>) -> Self {
        Self { translations }
    }

    /// A normalizer without a translation dictionary. Abbreviation and
    /// phrase expansion still apply.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reduce a raw display name to its canonical matching key.
    ///
    /// Pass order: exact dictionary lookup, uppercase, full-phrase
    /// expansion, word-bounded abbreviation expansion, lowercase and strip
    /// to `[a-z0-9]`.
    pub fn normalize(&self, raw: &str) -> CredentialKey {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CredentialKey::default();
        }

        let translated =
            self.translations.get(trimmed).map(String::as_str).unwrap_or(trimmed);

        let mut upper = translated.to_uppercase();
        for (from, to) in PHRASES {
            upper = upper.replace(from, to);
        }
        let upper = LOW_VOLTAGE.replace_all(&upper, "LAAGSPANNING");
        let upper = HIGH_VOLTAGE.replace_all(&upper, "HOOGSPANNING");

        let lower = upper.to_lowercase().replace(VENDOR_TOKEN, "");
        let key: String = lower.chars().filter(char::is_ascii_alphanumeric).collect();
        CredentialKey::new(key)
    }

    /// The preferred display form for a raw name: the dictionary's
    /// canonical term when one exists, the trimmed raw name otherwise.
    pub fn display_name(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        self.translations
            .get(trimmed)
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| trimmed.to_string())
    }
}

/// Tracks which display name represents each key, surfacing collisions
/// between visibly different spellings for manual review.
#[derive(Debug, Default)]
pub struct DisplayNames {
    seen: HashMap<CredentialKey, String>,
}

impl DisplayNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a (key, display name) sighting. Returns a warning when the
    /// key was already represented by a different-looking name; the most
    /// recently seen name wins.
    pub fn record(&mut self, key: &CredentialKey, name: &str) -> Option<String> {
        let name = name.trim();
        if key.is_empty() || name.is_empty() {
            return None;
        }
        match self.seen.insert(key.clone(), name.to_string()) {
            Some(previous) if !previous.eq_ignore_ascii_case(name) => Some(format!(
                "ambiguous credential name: '{previous}' and '{name}' both reduce to '{key}'"
            )),
            _ => None,
        }
    }

    /// The display name currently representing a key.
    pub fn get(&self, key: &CredentialKey) -> Option<&str> {
        self.seen.get(key).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
