// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON snapshot-directory source.
//!
//! Reads one file per feed from a data directory. The feeds come from
//! exports whose column names drift between systems and languages; that
//! drift is absorbed here, at the boundary, with serde aliases and lenient
//! date parsing — never inside the reconciliation logic.

use crate::source::{IdMapping, SourceError, WorklistSource};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use cw_core::{
    CredentialKey, Employee, EmployeeId, EnrollmentRow, HoldingRow, RequirementEntry, ResultRow,
    Task,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Snapshot directory layout: `roster.json`, `requirements.json`,
/// `results.json`, `holdings.json`, `enrollments.json`, `worklist.json`,
/// `translations.json`.
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Load a file as a row array, decoding rows one by one so a single
    /// malformed row is dropped with a warning instead of failing the
    /// whole feed.
    fn load_rows<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
        required: bool,
    ) -> Result<Vec<T>, SourceError> {
        let path = self.path(file);
        if !path.exists() {
            if required {
                return Err(SourceError::unavailable("snapshot", format!("{file} not found")));
            }
            tracing::debug!(file, "snapshot file absent, treating as empty");
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&path)?;
        let values: Vec<serde_json::Value> = serde_json::from_str(&text)?;

        let mut rows = Vec::with_capacity(values.len());
        for (idx, value) in values.into_iter().enumerate() {
            match serde_json::from_value(value) {
                Ok(row) => rows.push(row),
                Err(e) => tracing::warn!(file, row = idx, error = %e, "dropping malformed row"),
            }
        }
        Ok(rows)
    }
}

impl WorklistSource for JsonDirSource {
    fn load_roster(&self) -> Result<Vec<Employee>, SourceError> {
        let rows: Vec<EmployeeDto> = self.load_rows("roster.json", true)?;
        Ok(rows.into_iter().filter_map(EmployeeDto::into_employee).collect())
    }

    fn load_requirements(&self) -> Result<Vec<RequirementEntry>, SourceError> {
        let rows: Vec<RequirementDto> = self.load_rows("requirements.json", true)?;
        Ok(rows.into_iter().filter_map(RequirementDto::into_entry).collect())
    }

    fn load_achievement_sources(
        &self,
    ) -> Result<(Vec<ResultRow>, Vec<HoldingRow>), SourceError> {
        let results: Vec<ResultDto> = self.load_rows("results.json", false)?;
        let holdings: Vec<HoldingDto> = self.load_rows("holdings.json", false)?;
        Ok((
            results.into_iter().map(ResultDto::into_row).collect(),
            holdings.into_iter().map(HoldingDto::into_row).collect(),
        ))
    }

    fn load_enrollments(&self) -> Result<Vec<EnrollmentRow>, SourceError> {
        let rows: Vec<EnrollmentDto> = self.load_rows("enrollments.json", false)?;
        Ok(rows.into_iter().map(EnrollmentDto::into_row).collect())
    }

    fn load_worklist(&self) -> Result<Vec<Task>, SourceError> {
        let mut tasks: Vec<Task> = self.load_rows("worklist.json", false)?;
        // Everything read back from the store is persisted by definition.
        for task in &mut tasks {
            task.persisted = true;
        }
        Ok(tasks)
    }

    fn load_translations(&self) -> Result<HashMap<String, String>, SourceError> {
        let path = self.path("translations.json");
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let text = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn persist_worklist(&self, tasks: &[Task]) -> Result<IdMapping, SourceError> {
        let mut mapping = IdMapping::new();
        let mut stored = Vec::with_capacity(tasks.len());
        for task in tasks {
            let mut row = task.clone();
            if !row.persisted {
                // The file store keeps the generated id; a database-backed
                // source would substitute its surrogate key here.
                mapping.insert(row.id.clone(), row.id.clone());
                row.persisted = true;
            }
            stored.push(row);
        }

        let text = serde_json::to_string_pretty(&stored)?;
        let path = self.path("worklist.json");
        let tmp = self.path("worklist.json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &path)?;
        tracing::info!(rows = stored.len(), path = %path.display(), "worklist persisted");
        Ok(mapping)
    }
}

fn default_true() -> bool {
    true
}

/// Lenient calendar-date parsing: ISO dates, the predecessor's
/// day-first exports, and full timestamps.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%d-%m-%Y") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    None
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    parse_date(s).map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
}

fn clean(s: String) -> String {
    let t = s.trim();
    if t.eq_ignore_ascii_case("nan") || t.eq_ignore_ascii_case("null") {
        String::new()
    } else {
        t.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct EmployeeDto {
    #[serde(default, alias = "employee_id", alias = "staff_gid", alias = "staffGID")]
    id: String,
    #[serde(default, alias = "full_name", alias = "display_name")]
    name: String,
    #[serde(default, alias = "cost_center", alias = "unit_code")]
    unit: Option<String>,
    /// Legacy roster exports carry a numeric status column, 1 = active.
    #[serde(default, alias = "status_id")]
    status: Option<i64>,
    #[serde(default)]
    active: Option<bool>,
    #[serde(default, alias = "sap_nr", alias = "staffSAPNR")]
    personnel_nr: Option<String>,
}

impl EmployeeDto {
    fn into_employee(self) -> Option<Employee> {
        let id = clean(self.id);
        if id.is_empty() {
            tracing::warn!("dropping roster row without employee id");
            return None;
        }
        let active = self.active.unwrap_or(self.status.is_none_or(|s| s == 1));
        Some(Employee {
            id: EmployeeId::new(id),
            name: clean(self.name),
            unit: self.unit.map(clean).filter(|u| !u.is_empty()),
            active,
            personnel_nr: self.personnel_nr.map(clean).filter(|p| !p.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RequirementDto {
    #[serde(default, alias = "employee_id", alias = "staff_gid", alias = "staffGID")]
    employee: String,
    #[serde(default, alias = "cert_name", alias = "credential")]
    name: String,
    #[serde(default)]
    key: Option<String>,
    #[serde(default = "default_true", alias = "needed")]
    required: bool,
    #[serde(default, alias = "strategically_important")]
    strategic: bool,
    #[serde(default, alias = "validity_months", alias = "interval_months")]
    renewal_months: Option<u32>,
    #[serde(default)]
    comment: String,
    #[serde(default, alias = "last_modified")]
    modified_at: Option<String>,
}

impl RequirementDto {
    fn into_entry(self) -> Option<RequirementEntry> {
        let employee = clean(self.employee);
        let name = clean(self.name);
        if employee.is_empty() || name.is_empty() {
            tracing::warn!("dropping requirement row without employee id or name");
            return None;
        }
        Some(RequirementEntry {
            employee: EmployeeId::new(employee),
            key: self.key.map(CredentialKey::new).unwrap_or_default(),
            name,
            required: self.required,
            strategic: self.strategic,
            renewal_months: self.renewal_months,
            comment: clean(self.comment),
            modified_at: self.modified_at.as_deref().and_then(parse_datetime),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ResultDto {
    #[serde(default, alias = "employee_id", alias = "staff_gid", alias = "staffGID")]
    id: String,
    #[serde(default, alias = "cert_name", alias = "training", alias = "course")]
    name: String,
    #[serde(default, alias = "result")]
    status: String,
    #[serde(default, alias = "achieved", alias = "exam_date", alias = "completed")]
    achieved_on: Option<String>,
    #[serde(default, alias = "expires", alias = "valid_until", alias = "expiry_date")]
    valid_to: Option<String>,
}

impl ResultDto {
    fn into_row(self) -> ResultRow {
        ResultRow {
            employee_id: clean(self.id),
            name: clean(self.name),
            status: clean(self.status),
            achieved: self.achieved_on.as_deref().and_then(parse_date),
            expires: self.valid_to.as_deref().and_then(parse_date),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HoldingDto {
    #[serde(default, alias = "employee_id", alias = "staff_gid", alias = "staffGID")]
    id: String,
    #[serde(default, alias = "cert_name", alias = "credential")]
    name: String,
    #[serde(default, alias = "issued", alias = "issue_date", alias = "achieved")]
    issued_on: Option<String>,
    #[serde(default, alias = "expires", alias = "valid_until", alias = "expiry_date")]
    valid_to: Option<String>,
}

impl HoldingDto {
    fn into_row(self) -> HoldingRow {
        HoldingRow {
            employee_id: clean(self.id),
            name: clean(self.name),
            issued: self.issued_on.as_deref().and_then(parse_date),
            expires: self.valid_to.as_deref().and_then(parse_date),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EnrollmentDto {
    #[serde(default, alias = "employee_id", alias = "staff_gid", alias = "user_id")]
    id: String,
    #[serde(default, alias = "cert_name", alias = "item_description")]
    name: String,
    #[serde(default, alias = "scheduled", alias = "scheduled_date", alias = "planned_date")]
    scheduled_on: Option<String>,
    #[serde(default)]
    location: String,
}

impl EnrollmentDto {
    fn into_row(self) -> EnrollmentRow {
        EnrollmentRow {
            employee_id: clean(self.id),
            name: clean(self.name),
            scheduled: self.scheduled_on.as_deref().and_then(parse_date),
            location: clean(self.location),
        }
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
