//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task-list use cases to Dart via FRB.
//! - Map core results and notices into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call opens storage, applies one use case, and drops the
//!   controller; transient UI state (filter, modal) lives in Dart.
//! - The Dart host owns timers and desktop notifications; `todo_tick`
//!   returns reminder messages instead of dispatching them.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use taskpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, now_epoch_ms,
    parse_local_datetime, ping as ping_inner, Category, FilterCriterion, HostCapabilities,
    NoopNotifier, Notice, NoticeLevel, SqliteKeyValueStore, TaskView, TaskpadConfig,
    TodoController,
};

const DB_FILE_NAME: &str = "taskpad.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type FfiController = TodoController<SqliteKeyValueStore, NoopNotifier>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub content: String,
    /// `personal|work|urgent`.
    pub category: String,
    pub category_icon: String,
    pub completed: bool,
    /// Due label text, e.g. `Due tomorrow`.
    pub due_text: Option<String>,
    /// Due style hook: `overdue|due-soon|normal`.
    pub due_status: Option<String>,
    pub toggle_title: String,
}

/// Full render model for the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSnapshot {
    pub ok: bool,
    /// Effective filter (`all` when the requested one was unknown).
    pub filter: String,
    pub items: Vec<TodoItem>,
    pub is_empty: bool,
    pub stats_text: String,
    /// `light|dark`.
    pub theme: String,
    pub message: String,
}

/// Result of a mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    pub task_id: Option<String>,
    /// `success|info|error`, empty when nothing was reported.
    pub level: String,
    pub message: String,
}

impl TodoActionResponse {
    fn from_notices(ok: bool, task_id: Option<String>, notices: Vec<Notice>) -> Self {
        // A save failure outranks the success notice queued after it.
        let notice = notices
            .iter()
            .find(|notice| notice.level == NoticeLevel::Error)
            .or_else(|| notices.last());
        Self {
            ok,
            task_id,
            level: notice
                .map(|notice| notice.level.as_str().to_string())
                .unwrap_or_default(),
            message: notice
                .map(|notice| notice.message.clone())
                .unwrap_or_default(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            level: NoticeLevel::Error.as_str().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTickResponse {
    pub ok: bool,
    /// Reminder texts in collection order; show the last one in the modal.
    pub reminders: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoExportResponse {
    pub ok: bool,
    pub file_name: String,
    pub json: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoImportResponse {
    pub ok: bool,
    pub imported: u32,
    pub message: String,
}

/// Renders the list with `filter` (`all|personal|work|urgent|completed`).
///
/// `system_prefers_dark` is only used while no theme was ever saved.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_snapshot(filter: String, system_prefers_dark: bool) -> TodoSnapshot {
    let criterion = FilterCriterion::parse(&filter);
    let result = with_controller(system_prefers_dark, |controller| {
        controller.set_filter(criterion.unwrap_or_default());
        controller.render(now_epoch_ms())
    });
    match result {
        Ok(view) => TodoSnapshot {
            ok: true,
            filter: view.filter.as_str().to_string(),
            is_empty: view.is_empty,
            items: view.items.iter().map(to_todo_item).collect(),
            stats_text: view.stats_text,
            theme: view.theme.as_str().to_string(),
            message: match criterion {
                Some(_) => String::new(),
                None => format!("unknown filter `{}`; showing all", filter.trim()),
            },
        },
        Err(err) => TodoSnapshot {
            ok: false,
            filter: FilterCriterion::All.as_str().to_string(),
            items: Vec::new(),
            is_empty: true,
            stats_text: String::new(),
            theme: if system_prefers_dark { "dark" } else { "light" }.to_string(),
            message: format!("todo_snapshot failed: {err}"),
        },
    }
}

/// Adds a task.
///
/// Input semantics:
/// - `category`: `personal|work|urgent`; `None` uses the configured default.
/// - `due_local`: picker text `YYYY-MM-DDTHH:MM` in local time; empty means
///   no due date.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(
    content: String,
    category: Option<String>,
    due_local: Option<String>,
) -> TodoActionResponse {
    let category = match category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match Category::parse(raw) {
            Some(category) => Some(category),
            None => return TodoActionResponse::failure(format!("unknown category `{raw}`")),
        },
    };
    let due_date = match due_local.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match parse_local_datetime(raw) {
            Some(due) => Some(due),
            None => return TodoActionResponse::failure(format!("invalid due date `{raw}`")),
        },
    };

    respond(|controller| {
        let task_id = controller.add_task(&content, category, due_date, now_epoch_ms());
        (task_id.is_some(), task_id)
    })
}

/// Flips completion of `task_id`. Unknown ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(task_id: String) -> TodoActionResponse {
    respond(|controller| {
        let ok = controller.toggle_complete(&task_id, now_epoch_ms());
        (ok, ok.then(|| task_id.clone()))
    })
}

/// Deletes `task_id` immediately; the removal animation is Dart's job.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(task_id: String) -> TodoActionResponse {
    respond(|controller| {
        let ok = controller.delete_task(&task_id);
        (ok, ok.then(|| task_id.clone()))
    })
}

/// Flips and persists the theme. `message` carries the new theme name.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle_dark_mode(system_prefers_dark: bool) -> TodoActionResponse {
    let result = with_controller(system_prefers_dark, |controller| {
        controller.toggle_dark_mode();
        (controller.theme(), controller.drain_notices())
    });
    match result {
        Ok((theme, notices)) => match notices.into_iter().next() {
            Some(notice) => TodoActionResponse {
                ok: false,
                task_id: None,
                level: notice.level.as_str().to_string(),
                message: notice.message,
            },
            None => TodoActionResponse {
                ok: true,
                task_id: None,
                level: NoticeLevel::Info.as_str().to_string(),
                message: theme.as_str().to_string(),
            },
        },
        Err(err) => TodoActionResponse::failure(format!("todo_toggle_dark_mode failed: {err}")),
    }
}

/// Runs one reminder scan. Call from the host's periodic timer.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_tick() -> TodoTickResponse {
    let result = with_controller(false, |controller| {
        let reminders = controller.run_reminder_scan(now_epoch_ms());
        let failed = controller
            .drain_notices()
            .into_iter()
            .find(|notice| notice.level == NoticeLevel::Error);
        (reminders, failed)
    });
    match result {
        Ok((reminders, failed)) => TodoTickResponse {
            ok: failed.is_none(),
            message: failed.map(|notice| notice.message).unwrap_or_default(),
            reminders: reminders
                .into_iter()
                .map(|reminder| reminder.message)
                .collect(),
        },
        Err(err) => TodoTickResponse {
            ok: false,
            reminders: Vec::new(),
            message: format!("todo_tick failed: {err}"),
        },
    }
}

/// Serializes the collection for download.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_export() -> TodoExportResponse {
    let result = with_controller(false, |controller| {
        let exported = controller.export(now_epoch_ms());
        (exported, controller.drain_notices())
    });
    match result {
        Ok((Ok(file), notices)) => TodoExportResponse {
            ok: true,
            file_name: file.file_name,
            json: file.json,
            message: last_message(notices),
        },
        Ok((Err(err), notices)) => {
            warn!("event=ffi_export module=ffi status=error error={err}");
            TodoExportResponse {
                ok: false,
                file_name: String::new(),
                json: String::new(),
                message: last_message(notices),
            }
        }
        Err(err) => TodoExportResponse {
            ok: false,
            file_name: String::new(),
            json: String::new(),
            message: format!("todo_export failed: {err}"),
        },
    }
}

/// Replaces the whole collection with the tasks in `json`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_import(json: String) -> TodoImportResponse {
    let result = with_controller(false, |controller| {
        let imported = controller.import_json(&json);
        (imported, controller.drain_notices())
    });
    match result {
        Ok((Ok(count), notices)) => TodoImportResponse {
            ok: true,
            imported: u32::try_from(count).unwrap_or(u32::MAX),
            message: last_message(notices),
        },
        Ok((Err(err), notices)) => {
            warn!("event=ffi_import module=ffi status=error error={err}");
            TodoImportResponse {
                ok: false,
                imported: 0,
                message: last_message(notices),
            }
        }
        Err(err) => TodoImportResponse {
            ok: false,
            imported: 0,
            message: format!("todo_import failed: {err}"),
        },
    }
}

fn respond(
    f: impl FnOnce(&mut FfiController) -> (bool, Option<String>),
) -> TodoActionResponse {
    match with_controller(false, |controller| {
        let (ok, task_id) = f(controller);
        (ok, task_id, controller.drain_notices())
    }) {
        Ok((ok, task_id, notices)) => TodoActionResponse::from_notices(ok, task_id, notices),
        Err(err) => TodoActionResponse::failure(err),
    }
}

fn with_controller<T>(
    system_prefers_dark: bool,
    f: impl FnOnce(&mut FfiController) -> T,
) -> Result<T, String> {
    let config = resolve_config()?;
    let db_path = resolve_db_path();
    let kv = SqliteKeyValueStore::open(&db_path).map_err(|err| {
        warn!("event=ffi_storage_open module=ffi status=error error={err}");
        format!("storage open failed: {err}")
    })?;
    let mut controller = TodoController::new(
        config,
        kv,
        NoopNotifier,
        HostCapabilities::new(false, system_prefers_dark),
    );
    Ok(f(&mut controller))
}

fn resolve_config() -> Result<TaskpadConfig, String> {
    match std::env::var("TASKPAD_CONFIG_PATH") {
        Ok(raw) if !raw.trim().is_empty() => {
            TaskpadConfig::load_or_default(raw.trim()).map_err(|err| err.to_string())
        }
        _ => Ok(TaskpadConfig::default()),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TASKPAD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn to_todo_item(view: &TaskView) -> TodoItem {
    TodoItem {
        id: view.id.clone(),
        content: view.content.clone(),
        category: view.category.as_str().to_string(),
        category_icon: view.category_icon.to_string(),
        completed: view.completed,
        due_text: view.due.as_ref().map(|due| due.text.clone()),
        due_status: view.due.as_ref().map(|due| due.status.as_str().to_string()),
        toggle_title: view.toggle_title.to_string(),
    }
}

fn last_message(notices: Vec<Notice>) -> String {
    notices
        .into_iter()
        .last()
        .map(|notice| notice.message)
        .unwrap_or_default()
}
