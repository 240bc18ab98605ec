//! Transient user feedback queued by the controller.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// One toast-style message for the host to display and then discard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub const MSG_TASK_ADDED: &str = "Task added successfully! 🎉";
pub const MSG_TASK_EMPTY: &str = "Task content cannot be empty";
pub const MSG_TASK_COMPLETED: &str = "Task completed! Great job! 🎉";
pub const MSG_TASK_REOPENED: &str = "Task marked as incomplete";
pub const MSG_TASK_DELETED: &str = "Task deleted successfully";
pub const MSG_SAVE_TASKS_FAILED: &str = "Failed to save tasks";
pub const MSG_SAVE_THEME_FAILED: &str = "Failed to save theme preference";
pub const MSG_EXPORTED: &str = "Tasks exported successfully!";
pub const MSG_EXPORT_FAILED: &str = "Failed to export tasks";
pub const MSG_IMPORTED: &str = "Tasks imported successfully!";
pub const MSG_IMPORT_FAILED: &str = "Failed to import tasks. Invalid file format.";
