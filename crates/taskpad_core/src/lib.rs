//! Core domain logic for Taskpad.
//! This crate is the single source of truth for task-list invariants.

pub mod config;
pub mod controller;
pub mod db;
pub mod host;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod repo;
pub mod service;

pub use config::{ConfigError, TaskpadConfig};
pub use controller::app::{ExportFile, TodoController};
pub use controller::dispatch::{ActionBinding, TaskAction, UiEvent};
pub use controller::modal::{DismissReason, ReminderModal};
pub use controller::notice::{Notice, NoticeLevel};
pub use controller::view::{TaskView, Theme, ViewModel};
pub use host::capability::{
    HostCapabilities, NoopNotifier, NotificationCapability, Notifier, NotifyError,
};
pub use host::clock::{now_epoch_ms, parse_local_datetime};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::filter::FilterCriterion;
pub use model::task::{Category, Task, TaskId, TaskValidationError};
pub use reminder::due_label::{classify_due, DueLabel, DueStatus};
pub use reminder::evaluator::{
    evaluate_reminder, scan_reminders, Reminder, ReminderUrgency, ReminderWindow,
};
pub use repo::kv_repo::{
    KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore,
};
pub use service::backup::{ExportDocument, ImportError};
pub use service::persistence::{PersistenceAdapter, PersistenceError, StorageKeys};
pub use service::task_store::{filter_tasks, TaskStats, TaskStore};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
