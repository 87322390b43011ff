//! Export, import and full backups.
//!
//! Exports are pretty-printed JSON documents. Imports are parsed and
//! normalized completely before anything is handed back, so a bad record
//! anywhere in the file means nothing is applied.

use crate::collection::Record;
use crate::error::{Error, Result};
use crate::id::{generate_id, RecordId};
use crate::models::{Note, Project, SavedScript, Settings, Task};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// User-facing notice when an empty collection is exported.
fn nothing_to_export(collection: &str) -> String {
    match collection {
        "tasks" => "Keine Aufgaben zum Exportieren".to_string(),
        "notes" => "Keine Notizen zum Exportieren".to_string(),
        "projects" => "Keine Projekte zum Exportieren".to_string(),
        "scripts" => "Keine Scripts zum Exportieren vorhanden".to_string(),
        other => format!("Keine Einträge in '{other}' zum Exportieren"),
    }
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Export one collection as `{ <collection>: [...], exported, stats }`.
///
/// # Errors
///
/// Returns a validation error when `records` is empty, or a JSON error if
/// serialization fails.
pub fn export_collection<R: Record, T: Serialize>(records: &[R], stats: &T, now: DateTime<Utc>) -> Result<String> {
    if records.is_empty() {
        return Err(Error::validation(nothing_to_export(R::COLLECTION)));
    }
    let mut doc = Map::new();
    doc.insert(R::COLLECTION.to_string(), serde_json::to_value(records)?);
    doc.insert("exported".to_string(), Value::String(timestamp(now)));
    doc.insert("stats".to_string(), serde_json::to_value(stats)?);
    Ok(serde_json::to_string_pretty(&Value::Object(doc))?)
}

/// Export a single saved script as `{ script, exported }`.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn export_script(script: &SavedScript, now: DateTime<Utc>) -> Result<String> {
    let doc = serde_json::json!({ "script": script, "exported": timestamp(now) });
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// How ids in an incoming file are treated.
enum IdPolicy {
    /// Every record gets a new id.
    Fresh,
    /// Valid, unique UUIDs are kept; anything else is replaced.
    KeepValid(HashSet<RecordId>),
}

impl IdPolicy {
    fn assign(&mut self, stored: Option<&Value>) -> RecordId {
        match self {
            Self::Fresh => generate_id(),
            Self::KeepValid(seen) => {
                let parsed = stored.and_then(Value::as_str).and_then(|s| RecordId::parse_str(s).ok());
                match parsed {
                    Some(id) if seen.insert(id) => id,
                    _ => {
                        let id = generate_id();
                        seen.insert(id);
                        id
                    }
                }
            }
        }
    }
}

/// Turn one raw JSON object into a typed record.
///
/// Fills in the id according to `ids`, a missing `createdAt` with `now` and
/// a missing `updatedAt` with the creation time, then settles the record's
/// own invariants.
fn normalize<R: Record>(item: Value, index: usize, ids: &mut IdPolicy, now: DateTime<Utc>) -> Result<R> {
    let Value::Object(mut fields) = item else {
        return Err(Error::import(format!("{} #{}: kein JSON-Objekt", R::COLLECTION, index + 1)));
    };
    let id = ids.assign(fields.get("id"));
    fields.insert("id".to_string(), Value::String(id.to_string()));

    let created = match fields.get("createdAt") {
        Some(Value::String(s)) if !s.is_empty() => Value::String(s.clone()),
        _ => Value::String(timestamp(now)),
    };
    fields.insert("createdAt".to_string(), created.clone());
    if !matches!(fields.get("updatedAt"), Some(Value::String(s)) if !s.is_empty()) {
        fields.insert("updatedAt".to_string(), created);
    }

    let mut record: R = serde_json::from_value(Value::Object(fields))
        .map_err(|err| Error::import(format!("{} #{}: {err}", R::COLLECTION, index + 1)))?;
    record.normalize();
    Ok(record)
}

fn normalize_all<R: Record>(items: Vec<Value>, ids: &mut IdPolicy, now: DateTime<Utc>) -> Result<Vec<R>> {
    items.into_iter().enumerate().map(|(i, item)| normalize(item, i, ids, now)).collect()
}

/// Parse a per-collection import file.
///
/// Accepts `{ <collection>: [...] }` and, for kinds with a single-record
/// wrapper, `{ <item>: {...} }`. Every record gets a fresh id. The records
/// come back in file order.
///
/// # Errors
///
/// Returns an import error if the file is not JSON, has neither wrapper,
/// or any record fails to parse.
pub fn parse_import<R: Record>(json: &str, now: DateTime<Utc>) -> Result<Vec<R>> {
    let doc: Value =
        serde_json::from_str(json).map_err(|err| Error::import(format!("Ungültiges JSON: {err}")))?;
    let mut ids = IdPolicy::Fresh;

    if let Some(items) = doc.get(R::COLLECTION) {
        let Value::Array(items) = items else {
            return Err(Error::import(format!("'{}' ist keine Liste", R::COLLECTION)));
        };
        return normalize_all(items.clone(), &mut ids, now);
    }
    if let Some(item) = R::ITEM_KEY.and_then(|key| doc.get(key)) {
        return Ok(vec![normalize(item.clone(), 0, &mut ids, now)?]);
    }
    Err(Error::import(format!("Unbekanntes Format: '{}' fehlt", R::COLLECTION)))
}

/// Full backup document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Task list, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    /// Notes, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
    /// Projects, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    /// Saved scripts; absent in older backups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<SavedScript>>,
    /// UI settings, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    /// When the backup was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

impl Backup {
    /// Number of records across all collections present.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.tasks.as_ref().map_or(0, Vec::len)
            + self.notes.as_ref().map_or(0, Vec::len)
            + self.projects.as_ref().map_or(0, Vec::len)
            + self.scripts.as_ref().map_or(0, Vec::len)
    }
}

/// Serialize a full backup.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn export_backup(backup: &Backup) -> Result<String> {
    Ok(serde_json::to_string_pretty(backup)?)
}

fn section<R: Record>(doc: &mut Map<String, Value>, now: DateTime<Utc>) -> Result<Option<Vec<R>>> {
    match doc.remove(R::COLLECTION) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let mut ids = IdPolicy::KeepValid(HashSet::new());
            normalize_all(items, &mut ids, now).map(Some)
        }
        Some(_) => Err(Error::import(format!("'{}' ist keine Liste", R::COLLECTION))),
    }
}

/// Parse a backup file, including ones written before scripts were backed up
/// or with legacy numeric ids.
///
/// # Errors
///
/// Returns an import error if the file is not a JSON object or any section
/// fails to parse.
pub fn parse_backup(json: &str, now: DateTime<Utc>) -> Result<Backup> {
    let doc: Value =
        serde_json::from_str(json).map_err(|err| Error::import(format!("Ungültiges JSON: {err}")))?;
    let Value::Object(mut doc) = doc else {
        return Err(Error::import("Backup ist kein JSON-Objekt"));
    };

    let settings = match doc.remove("settings") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value(value).map_err(|err| Error::import(format!("settings: {err}")))?,
        ),
    };
    let export_date = doc
        .get("exportDate")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc));

    Ok(Backup {
        tasks: section(&mut doc, now)?,
        notes: section(&mut doc, now)?,
        projects: section(&mut doc, now)?,
        scripts: section(&mut doc, now)?,
        settings,
        export_date,
    })
}
