//! Runtime configuration for the task controller.
//!
//! # Responsibility
//! - Hold tunables that hosts may override (timings, defaults, storage keys).
//! - Parse JSON config text where every field is optional.
//!
//! # Invariants
//! - A config returned by `from_json_str`/`load` has passed `validate()`.

use crate::model::task::Category;
use crate::reminder::evaluator::ReminderWindow;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_TASKS_KEY: &str = "todoTasks";
pub const DEFAULT_DARK_MODE_KEY: &str = "todoAppDarkMode";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskpadConfig {
    /// Category applied when the user does not pick one.
    pub default_category: Category,
    /// Reminder scan period.
    pub tick_interval_ms: i64,
    pub reminder_lead_minutes: i64,
    pub reminder_overdue_grace_minutes: i64,
    /// Delay between marking a row as removing and committing the delete.
    pub delete_commit_delay_ms: i64,
    pub tasks_key: String,
    pub dark_mode_key: String,
}

impl Default for TaskpadConfig {
    fn default() -> Self {
        Self {
            default_category: Category::Personal,
            tick_interval_ms: 60_000,
            reminder_lead_minutes: 30,
            reminder_overdue_grace_minutes: 60,
            delete_commit_delay_ms: 300,
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
            dark_mode_key: DEFAULT_DARK_MODE_KEY.to_string(),
        }
    }
}

impl TaskpadConfig {
    /// Parses and validates JSON config text. Missing fields take defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms <= 0 {
            return Err(ConfigError::Invalid(format!(
                "tick_interval_ms must be positive, got {}",
                self.tick_interval_ms
            )));
        }
        if self.reminder_lead_minutes < 0 || self.reminder_overdue_grace_minutes < 0 {
            return Err(ConfigError::Invalid(
                "reminder window minutes must not be negative".to_string(),
            ));
        }
        if self.delete_commit_delay_ms < 0 {
            return Err(ConfigError::Invalid(
                "delete_commit_delay_ms must not be negative".to_string(),
            ));
        }
        if self.tasks_key.trim().is_empty() || self.dark_mode_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage keys must not be empty".to_string(),
            ));
        }
        if self.tasks_key == self.dark_mode_key {
            return Err(ConfigError::Invalid(format!(
                "tasks_key and dark_mode_key must differ, both are `{}`",
                self.tasks_key
            )));
        }
        Ok(())
    }

    pub fn reminder_window(&self) -> ReminderWindow {
        ReminderWindow {
            lead_minutes: self.reminder_lead_minutes,
            overdue_grace_minutes: self.reminder_overdue_grace_minutes,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}
