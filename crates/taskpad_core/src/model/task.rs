//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted record of the task list.
//! - Own completion and reminder-flag transitions.
//!
//! # Invariants
//! - `id` is never empty and is never reassigned.
//! - `content` is trimmed and non-empty.
//! - `completed_at.is_some() == completed`.
//! - `reminder_shown` only ever moves from `false` to `true`.

use crate::host::clock::parse_local_datetime;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::{NoContext, Timestamp, Uuid};

/// Opaque task identifier.
///
/// Kept as a string so imported records with foreign id formats survive
/// unchanged.
pub type TaskId = String;

/// Fixed task category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Urgent,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Personal, Category::Work, Category::Urgent];

    /// Stable wire/display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Urgent => "urgent",
        }
    }

    /// Badge glyph shown next to the category name.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Personal => "📋",
            Self::Work => "💼",
            Self::Urgent => "🔥",
        }
    }

    /// Parses a category name; surrounding whitespace and case are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "personal" => Some(Self::Personal),
            "work" => Some(Self::Work),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for task construction and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    EmptyContent,
    CompletionMismatch {
        completed: bool,
        completed_at: Option<i64>,
    },
    /// A date-time field held text that is neither RFC 3339 nor picker shape.
    InvalidInstant {
        field: &'static str,
        value: String,
    },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyContent => write!(f, "task content must not be empty"),
            Self::CompletionMismatch {
                completed,
                completed_at,
            } => write!(
                f,
                "completedAt ({completed_at:?}) must be set iff completed ({completed})"
            ),
            Self::InvalidInstant { field, value } => {
                write!(f, "{field} `{value}` is not a recognized date-time")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do item.
///
/// All instants are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTask")]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    pub category: Category,
    pub due_date: Option<i64>,
    pub completed: bool,
    pub created_at: i64,
    pub completed_at: Option<i64>,
    pub reminder_shown: bool,
}

impl Task {
    /// Creates an open task with an id derived from `now_ms`.
    ///
    /// # Errors
    /// - `EmptyContent` when `content` trims to nothing.
    pub fn new(
        content: &str,
        category: Category,
        due_date: Option<i64>,
        now_ms: i64,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(generate_task_id(now_ms), content, category, due_date, now_ms)
    }

    /// Creates an open task with a caller-provided id.
    pub fn with_id(
        id: impl Into<TaskId>,
        content: &str,
        category: Category,
        due_date: Option<i64>,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: id.into(),
            content: content.trim().to_string(),
            category,
            due_date,
            completed: false,
            created_at,
            completed_at: None,
            reminder_shown: false,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.content.trim().is_empty() {
            return Err(TaskValidationError::EmptyContent);
        }
        if self.completed != self.completed_at.is_some() {
            return Err(TaskValidationError::CompletionMismatch {
                completed: self.completed,
                completed_at: self.completed_at,
            });
        }
        Ok(())
    }

    /// Flips completion state and returns the new value.
    pub fn toggle_complete(&mut self, now_ms: i64) -> bool {
        self.completed = !self.completed;
        self.completed_at = if self.completed { Some(now_ms) } else { None };
        self.completed
    }

    /// Records that a reminder fired. Returns `false` if it already had.
    pub fn mark_reminder_shown(&mut self) -> bool {
        if self.reminder_shown {
            return false;
        }
        self.reminder_shown = true;
        true
    }
}

/// Derives a fresh time-ordered id from the creation instant.
///
/// UUIDv7 carries the millisecond timestamp plus random bits, so two tasks
/// created within the same millisecond still get distinct ids.
pub fn generate_task_id(now_ms: i64) -> TaskId {
    let clamped = now_ms.max(0);
    let seconds = (clamped / 1000) as u64;
    let nanos = ((clamped % 1000) * 1_000_000) as u32;
    Uuid::new_v7(Timestamp::from_unix(NoContext, seconds, nanos)).to_string()
}

/// Instants arrive as epoch milliseconds or as date-time text; older
/// snapshots and backups store picker text for `dueDate` and ISO strings for
/// the timestamps.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireInstant {
    Millis(i64),
    Text(String),
}

impl WireInstant {
    fn resolve(self, field: &'static str) -> Result<Option<i64>, TaskValidationError> {
        let text = match self {
            Self::Millis(ms) => return Ok(Some(ms)),
            Self::Text(text) => text,
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|instant| instant.timestamp_millis())
            .ok()
            .or_else(|| parse_local_datetime(trimmed))
            .map(Some)
            .ok_or(TaskValidationError::InvalidInstant { field, value: text })
    }
}

fn resolve_optional(
    value: Option<WireInstant>,
    field: &'static str,
) -> Result<Option<i64>, TaskValidationError> {
    match value {
        Some(instant) => instant.resolve(field),
        None => Ok(None),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    id: TaskId,
    content: String,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    due_date: Option<WireInstant>,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    created_at: Option<WireInstant>,
    #[serde(default)]
    completed_at: Option<WireInstant>,
    #[serde(default)]
    reminder_shown: bool,
}

impl TryFrom<RawTask> for Task {
    type Error = TaskValidationError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let task = Task {
            id: raw.id,
            content: raw.content.trim().to_string(),
            category: raw.category,
            due_date: resolve_optional(raw.due_date, "dueDate")?,
            completed: raw.completed,
            // Unknown creation instants sort as the epoch.
            created_at: resolve_optional(raw.created_at, "createdAt")?.unwrap_or(0),
            completed_at: resolve_optional(raw.completed_at, "completedAt")?,
            reminder_shown: raw.reminder_shown,
        };
        task.validate()?;
        Ok(task)
    }
}
