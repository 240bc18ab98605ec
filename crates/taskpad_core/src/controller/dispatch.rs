//! UI event dispatch table.
//!
//! Rendered rows carry `(action, id)` bindings instead of callbacks; the host
//! feeds them back as events and this module routes them to controller
//! methods.

use crate::controller::app::TodoController;
use crate::controller::modal::DismissReason;
use crate::host::capability::Notifier;
use crate::model::filter::FilterCriterion;
use crate::model::task::{Category, TaskId};
use crate::repo::kv_repo::KeyValueStore;

/// Per-row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    Complete,
    Delete,
}

impl TaskAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Delete => "delete",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "complete" => Some(Self::Complete),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// `(action, task id)` pair attached to a rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionBinding {
    pub action: TaskAction,
    pub task_id: TaskId,
}

impl ActionBinding {
    pub fn new(action: TaskAction, task_id: impl Into<TaskId>) -> Self {
        Self {
            action,
            task_id: task_id.into(),
        }
    }

    /// Compact `action:id` form for hosts that store bindings as strings.
    pub fn encode(&self) -> String {
        format!("{}:{}", self.action.as_str(), self.task_id)
    }

    pub fn decode(value: &str) -> Option<Self> {
        let (action, task_id) = value.split_once(':')?;
        if task_id.is_empty() {
            return None;
        }
        Some(Self::new(TaskAction::parse(action)?, task_id))
    }
}

/// Every input the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SubmitTask {
        content: String,
        category: Option<Category>,
        due_date: Option<i64>,
    },
    Row(ActionBinding),
    SetFilter(FilterCriterion),
    ToggleDarkMode,
    DismissReminder(DismissReason),
    Import(String),
    Export,
    Tick,
}

type RowHandler<S, N> = fn(&mut TodoController<S, N>, &str, i64) -> bool;

/// Dispatch table for per-row actions.
fn row_handler<S: KeyValueStore, N: Notifier>(action: TaskAction) -> RowHandler<S, N> {
    match action {
        TaskAction::Complete => TodoController::toggle_complete,
        TaskAction::Delete => TodoController::begin_delete,
    }
}

impl<S: KeyValueStore, N: Notifier> TodoController<S, N> {
    /// Routes one UI event. Returns whether the event took effect.
    pub fn dispatch(&mut self, event: UiEvent, now_ms: i64) -> bool {
        match event {
            UiEvent::SubmitTask {
                content,
                category,
                due_date,
            } => self.add_task(&content, category, due_date, now_ms).is_some(),
            UiEvent::Row(binding) => row_handler(binding.action)(self, &binding.task_id, now_ms),
            UiEvent::SetFilter(criterion) => self.set_filter(criterion),
            UiEvent::ToggleDarkMode => {
                self.toggle_dark_mode();
                true
            }
            UiEvent::DismissReminder(reason) => self.dismiss_reminder(reason),
            UiEvent::Import(text) => self.import_json(&text).is_ok(),
            UiEvent::Export => self.export(now_ms).is_ok(),
            UiEvent::Tick => !self.poll(now_ms).is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionBinding, TaskAction};

    #[test]
    fn bindings_encode_and_decode() {
        let binding = ActionBinding::new(TaskAction::Delete, "0190-abc");
        assert_eq!(binding.encode(), "delete:0190-abc");
        assert_eq!(ActionBinding::decode("delete:0190-abc"), Some(binding));
        assert_eq!(ActionBinding::decode("archive:1"), None);
        assert_eq!(ActionBinding::decode("complete:"), None);
    }
}
