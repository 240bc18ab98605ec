//! Task list controller: the context object every host event goes through.
//!
//! # Responsibility
//! - Apply user actions and timer ticks to the task store.
//! - Mirror every committed mutation to persistence.
//! - Surface reminders through the modal and the host notifier.
//!
//! # Invariants
//! - Each public method runs to completion; there is no partial state
//!   between calls.
//! - Persistence failures never roll back in-memory state; they queue an
//!   error notice instead.
//! - Time only enters through `now_ms` arguments.

use crate::config::TaskpadConfig;
use crate::controller::modal::{DismissReason, ReminderModal};
use crate::controller::notice::{
    Notice, MSG_EXPORTED, MSG_EXPORT_FAILED, MSG_IMPORTED, MSG_IMPORT_FAILED,
    MSG_SAVE_TASKS_FAILED, MSG_SAVE_THEME_FAILED, MSG_TASK_ADDED, MSG_TASK_COMPLETED,
    MSG_TASK_DELETED, MSG_TASK_EMPTY, MSG_TASK_REOPENED,
};
use crate::controller::schedule::TickSchedule;
use crate::controller::view::{render_view, RenderInput, Theme, ViewModel};
use crate::host::capability::{HostCapabilities, Notifier, REMINDER_NOTIFICATION_TITLE};
use crate::model::filter::FilterCriterion;
use crate::model::task::{Category, Task, TaskId};
use crate::reminder::evaluator::{scan_reminders, Reminder};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::backup::{
    backup_file_name, build_export, export_json, parse_import, BackupError, ImportError,
};
use crate::service::persistence::{PersistenceAdapter, StorageKeys};
use crate::service::task_store::{filter_tasks, TaskStats, TaskStore};
use log::{debug, info, warn};

/// Delete requested but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingDelete {
    task_id: TaskId,
    commit_at_ms: i64,
}

/// Serialized export ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub json: String,
}

pub struct TodoController<S, N> {
    config: TaskpadConfig,
    store: TaskStore,
    persistence: PersistenceAdapter<S>,
    notifier: N,
    capabilities: HostCapabilities,
    current_filter: FilterCriterion,
    dark_mode: bool,
    modal: ReminderModal,
    schedule: TickSchedule,
    pending_deletes: Vec<PendingDelete>,
    notices: Vec<Notice>,
}

impl<S: KeyValueStore, N: Notifier> TodoController<S, N> {
    /// Loads persisted state and resolves the initial theme.
    ///
    /// An unset preference falls back to `capabilities.system_prefers_dark`.
    pub fn new(
        config: TaskpadConfig,
        kv: S,
        notifier: N,
        capabilities: HostCapabilities,
    ) -> Self {
        let persistence = PersistenceAdapter::new(
            kv,
            StorageKeys {
                tasks: config.tasks_key.clone(),
                dark_mode: config.dark_mode_key.clone(),
            },
        );
        let store = TaskStore::from_tasks(persistence.load_tasks());
        let saved_dark_mode = persistence.load_dark_mode();
        let dark_mode = saved_dark_mode.unwrap_or(capabilities.system_prefers_dark);

        info!(
            "event=controller_init module=controller status=ok tasks={} theme_source={} notifications={}",
            store.len(),
            if saved_dark_mode.is_some() { "saved" } else { "system" },
            capabilities.notifications.granted
        );

        Self {
            schedule: TickSchedule::new(config.tick_interval_ms),
            config,
            store,
            persistence,
            notifier,
            capabilities,
            current_filter: FilterCriterion::All,
            dark_mode,
            modal: ReminderModal::default(),
            pending_deletes: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn config(&self) -> &TaskpadConfig {
        &self.config
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    // ---- timers --------------------------------------------------------

    /// Starts the reminder schedule; the first scan is due at `now_ms`.
    pub fn start(&mut self, now_ms: i64) {
        self.schedule.start(now_ms);
        debug!(
            "event=schedule_start module=controller interval_ms={}",
            self.schedule.interval_ms()
        );
    }

    /// Stops the reminder schedule (teardown). Pending deletes still commit
    /// on the next `poll`.
    pub fn stop(&mut self) {
        self.schedule.stop();
        debug!("event=schedule_stop module=controller");
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    /// Host timer entry point: commits due deletes, then runs the reminder
    /// scan if the schedule says one is due.
    pub fn poll(&mut self, now_ms: i64) -> Vec<Reminder> {
        self.flush_pending_deletes(now_ms);
        if self.schedule.take_due(now_ms) {
            self.run_reminder_scan(now_ms)
        } else {
            Vec::new()
        }
    }

    // ---- task mutations ------------------------------------------------

    /// Adds a task at the front. `category` falls back to the configured
    /// default. Returns the new id, or `None` for blank content.
    pub fn add_task(
        &mut self,
        content: &str,
        category: Option<Category>,
        due_date: Option<i64>,
        now_ms: i64,
    ) -> Option<TaskId> {
        let category = category.unwrap_or(self.config.default_category);
        let Some(task) = self.store.add(content, category, due_date, now_ms) else {
            debug!("event=task_add module=controller status=rejected reason=empty_content");
            self.notices.push(Notice::error(MSG_TASK_EMPTY));
            return None;
        };
        let task_id = task.id.clone();
        info!(
            "event=task_add module=controller status=ok task_id={task_id} category={category} has_due={}",
            due_date.is_some()
        );

        self.persist_tasks();
        self.notices.push(Notice::success(MSG_TASK_ADDED));
        Some(task_id)
    }

    /// Flips completion. Unknown ids are ignored.
    pub fn toggle_complete(&mut self, task_id: &str, now_ms: i64) -> bool {
        let Some(completed) = self.store.toggle_complete(task_id, now_ms) else {
            debug!("event=task_toggle module=controller status=miss task_id={task_id}");
            return false;
        };
        info!("event=task_toggle module=controller status=ok task_id={task_id} completed={completed}");

        self.persist_tasks();
        self.notices.push(if completed {
            Notice::success(MSG_TASK_COMPLETED)
        } else {
            Notice::info(MSG_TASK_REOPENED)
        });
        true
    }

    /// First phase of a delete: the row renders as removing until
    /// `delete_commit_delay_ms` has passed and `poll` commits it.
    pub fn begin_delete(&mut self, task_id: &str, now_ms: i64) -> bool {
        if !self.store.contains(task_id) || self.is_removing(task_id) {
            return false;
        }
        self.pending_deletes.push(PendingDelete {
            task_id: task_id.to_string(),
            commit_at_ms: now_ms.saturating_add(self.config.delete_commit_delay_ms),
        });
        debug!("event=task_delete module=controller status=pending task_id={task_id}");
        true
    }

    /// Commits every pending delete whose delay has elapsed.
    pub fn flush_pending_deletes(&mut self, now_ms: i64) -> usize {
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_deletes)
            .into_iter()
            .partition(|pending| pending.commit_at_ms <= now_ms);
        self.pending_deletes = waiting;

        let removed = due
            .iter()
            .filter(|pending| self.store.delete(&pending.task_id).is_some())
            .count();
        if removed > 0 {
            info!("event=task_delete module=controller status=ok count={removed}");
            self.persist_tasks();
            for _ in 0..removed {
                self.notices.push(Notice::info(MSG_TASK_DELETED));
            }
        }
        removed
    }

    /// Deletes immediately, skipping the two-phase removal.
    pub fn delete_task(&mut self, task_id: &str) -> bool {
        self.pending_deletes
            .retain(|pending| pending.task_id != task_id);
        if self.store.delete(task_id).is_none() {
            debug!("event=task_delete module=controller status=miss task_id={task_id}");
            return false;
        }
        info!("event=task_delete module=controller status=ok task_id={task_id}");
        self.persist_tasks();
        self.notices.push(Notice::info(MSG_TASK_DELETED));
        true
    }

    pub fn is_removing(&self, task_id: &str) -> bool {
        self.pending_deletes
            .iter()
            .any(|pending| pending.task_id == task_id)
    }

    // ---- filter / theme ------------------------------------------------

    /// Changes the visible slice. Returns whether it differed.
    pub fn set_filter(&mut self, criterion: FilterCriterion) -> bool {
        let changed = self.current_filter != criterion;
        self.current_filter = criterion;
        changed
    }

    pub fn current_filter(&self) -> FilterCriterion {
        self.current_filter
    }

    pub fn filtered_tasks(&self) -> Vec<&Task> {
        filter_tasks(self.store.tasks(), self.current_filter)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(self.store.tasks())
    }

    /// Flips dark mode and persists the preference. Returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        info!(
            "event=theme_toggle module=controller status=ok theme={}",
            self.theme().as_str()
        );
        if self.persistence.save_dark_mode(self.dark_mode).is_err() {
            self.notices.push(Notice::error(MSG_SAVE_THEME_FAILED));
        }
        self.dark_mode
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }

    // ---- reminders -----------------------------------------------------

    /// Surfaces every newly eligible reminder and marks it shown.
    ///
    /// The host notification is best-effort: a refused permission or a
    /// failed dispatch never suppresses the in-app modal.
    pub fn run_reminder_scan(&mut self, now_ms: i64) -> Vec<Reminder> {
        let reminders = scan_reminders(
            self.store.tasks(),
            now_ms,
            self.config.reminder_window(),
        );
        if reminders.is_empty() {
            return reminders;
        }

        for reminder in &reminders {
            self.modal.show(reminder.message.as_str());
            if self.capabilities.notifications.granted {
                if let Err(err) = self
                    .notifier
                    .notify(REMINDER_NOTIFICATION_TITLE, &reminder.message)
                {
                    warn!(
                        "event=reminder_notify module=controller status=error task_id={} error={err}",
                        reminder.task_id
                    );
                }
            }
            self.store.mark_reminder_shown(&reminder.task_id);
            info!(
                "event=reminder_fired module=controller status=ok task_id={} urgency={:?}",
                reminder.task_id, reminder.urgency
            );
        }

        self.persist_tasks();
        reminders
    }

    pub fn modal(&self) -> &ReminderModal {
        &self.modal
    }

    /// Hides the reminder modal. Returns whether it was visible.
    pub fn dismiss_reminder(&mut self, reason: DismissReason) -> bool {
        self.modal.dismiss(reason)
    }

    // ---- import / export -----------------------------------------------

    pub fn export(&mut self, now_ms: i64) -> Result<ExportFile, BackupError> {
        let result = build_export(self.store.tasks(), now_ms).and_then(|document| {
            Ok(ExportFile {
                file_name: backup_file_name(now_ms)?,
                json: export_json(&document)?,
            })
        });
        match &result {
            Ok(_) => {
                info!(
                    "event=tasks_export module=controller status=ok count={}",
                    self.store.len()
                );
                self.notices.push(Notice::success(MSG_EXPORTED));
            }
            Err(err) => {
                warn!("event=tasks_export module=controller status=error error={err}");
                self.notices.push(Notice::error(MSG_EXPORT_FAILED));
            }
        }
        result
    }

    /// Replaces the whole collection with the imported one (no merge).
    /// On failure nothing changes and an error notice is queued.
    pub fn import_json(&mut self, text: &str) -> Result<usize, ImportError> {
        let tasks = match parse_import(text) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!("event=tasks_import module=controller status=error error={err}");
                self.notices.push(Notice::error(MSG_IMPORT_FAILED));
                return Err(err);
            }
        };

        let count = tasks.len();
        self.store.replace_all(tasks);
        self.pending_deletes.clear();
        info!("event=tasks_import module=controller status=ok count={count}");
        self.persist_tasks();
        self.notices.push(Notice::success(MSG_IMPORTED));
        Ok(count)
    }

    // ---- presentation --------------------------------------------------

    pub fn render(&self, now_ms: i64) -> ViewModel {
        render_view(
            RenderInput {
                tasks: self.store.tasks(),
                filter: self.current_filter,
                dark_mode: self.dark_mode,
                reminder_message: self.modal.message(),
                is_removing: &|task_id| self.is_removing(task_id),
            },
            now_ms,
        )
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hands queued notices to the host and clears the queue.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn persist_tasks(&mut self) {
        if self.persistence.save_tasks(self.store.tasks()).is_err() {
            self.notices.push(Notice::error(MSG_SAVE_TASKS_FAILED));
        }
    }
}
