//! Export/import of the full task collection as a JSON document.
//!
//! # Responsibility
//! - Build the `{ tasks, exportDate, version }` export document.
//! - Validate import text before it may replace the collection.
//!
//! # Invariants
//! - Import is all-or-nothing: any shape, record or id-uniqueness failure
//!   rejects the whole document.
//! - Export never mutates the collection.

use crate::model::task::Task;
use chrono::{SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Downloadable backup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub tasks: Vec<Task>,
    pub export_date: String,
    pub version: String,
}

#[derive(Debug)]
pub enum BackupError {
    InvalidTimestamp(i64),
    Encode(serde_json::Error),
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimestamp(value) => write!(f, "timestamp out of range: {value}"),
            Self::Encode(err) => write!(f, "export encode failed: {err}"),
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::InvalidTimestamp(_) => None,
        }
    }
}

#[derive(Debug)]
pub enum ImportError {
    Malformed(serde_json::Error),
    NotAnObject,
    MissingTasks,
    TasksNotArray,
    InvalidTask { index: usize, message: String },
    DuplicateId(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "import file is not valid JSON: {err}"),
            Self::NotAnObject => write!(f, "import document must be a JSON object"),
            Self::MissingTasks => write!(f, "import document has no `tasks` field"),
            Self::TasksNotArray => write!(f, "import `tasks` must be an array"),
            Self::InvalidTask { index, message } => {
                write!(f, "import task #{index} is invalid: {message}")
            }
            Self::DuplicateId(id) => write!(f, "import contains duplicate task id `{id}`"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

/// RFC 3339 UTC instant with millisecond precision.
pub fn format_instant(epoch_ms: i64) -> Result<String, BackupError> {
    Utc.timestamp_millis_opt(epoch_ms)
        .single()
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or(BackupError::InvalidTimestamp(epoch_ms))
}

pub fn build_export(tasks: &[Task], now_ms: i64) -> Result<ExportDocument, BackupError> {
    Ok(ExportDocument {
        tasks: tasks.to_vec(),
        export_date: format_instant(now_ms)?,
        version: EXPORT_FORMAT_VERSION.to_string(),
    })
}

/// Pretty-printed JSON for the export document.
pub fn export_json(document: &ExportDocument) -> Result<String, BackupError> {
    serde_json::to_string_pretty(document).map_err(BackupError::Encode)
}

/// Suggested download name, e.g. `todo-backup-2026-10-19.json`.
pub fn backup_file_name(now_ms: i64) -> Result<String, BackupError> {
    let instant = Utc
        .timestamp_millis_opt(now_ms)
        .single()
        .ok_or(BackupError::InvalidTimestamp(now_ms))?;
    Ok(format!("todo-backup-{}.json", instant.format("%Y-%m-%d")))
}

/// Parses import text into the replacement collection.
///
/// Only `tasks` is required; `exportDate` and `version` are informational.
pub fn parse_import(text: &str) -> Result<Vec<Task>, ImportError> {
    let document: Value = serde_json::from_str(text).map_err(ImportError::Malformed)?;
    let object = document.as_object().ok_or(ImportError::NotAnObject)?;
    let items = match object.get("tasks") {
        None | Some(Value::Null) => return Err(ImportError::MissingTasks),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ImportError::TasksNotArray),
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut tasks = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let task = Task::deserialize(item).map_err(|err| ImportError::InvalidTask {
            index,
            message: err.to_string(),
        })?;
        if !seen.insert(task.id.clone()) {
            return Err(ImportError::DuplicateId(task.id));
        }
        tasks.push(task);
    }
    Ok(tasks)
}
