//! Render model handed to the presentation surface.
//!
//! No markup is produced here; hosts map these rows onto their own widgets.

use crate::controller::dispatch::{ActionBinding, TaskAction};
use crate::model::filter::FilterCriterion;
use crate::model::task::{Category, Task, TaskId};
use crate::reminder::due_label::{classify_due, DueLabel};
use crate::service::task_store::{filter_tasks, TaskStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: TaskId,
    pub content: String,
    pub category: Category,
    pub category_icon: &'static str,
    pub completed: bool,
    /// Delete was requested and is waiting for its commit delay.
    pub removing: bool,
    pub due: Option<DueLabel>,
    pub toggle_title: &'static str,
    pub actions: [ActionBinding; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub filter: FilterCriterion,
    pub items: Vec<TaskView>,
    pub is_empty: bool,
    pub stats: TaskStats,
    pub stats_text: String,
    pub theme: Theme,
    pub reminder_message: Option<String>,
}

pub(crate) fn task_view(task: &Task, removing: bool, now_ms: i64) -> TaskView {
    TaskView {
        id: task.id.clone(),
        content: task.content.clone(),
        category: task.category,
        category_icon: task.category.icon(),
        completed: task.completed,
        removing,
        due: task.due_date.map(|due_ms| classify_due(due_ms, now_ms)),
        toggle_title: if task.completed {
            "Mark as incomplete"
        } else {
            "Mark as complete"
        },
        actions: [
            ActionBinding::new(TaskAction::Complete, task.id.clone()),
            ActionBinding::new(TaskAction::Delete, task.id.clone()),
        ],
    }
}

pub(crate) struct RenderInput<'a> {
    pub tasks: &'a [Task],
    pub filter: FilterCriterion,
    pub dark_mode: bool,
    pub reminder_message: Option<&'a str>,
    pub is_removing: &'a dyn Fn(&str) -> bool,
}

pub(crate) fn render_view(input: RenderInput<'_>, now_ms: i64) -> ViewModel {
    let items = filter_tasks(input.tasks, input.filter)
        .into_iter()
        .map(|task| task_view(task, (input.is_removing)(&task.id), now_ms))
        .collect::<Vec<_>>();
    let stats = TaskStats::from_tasks(input.tasks);
    ViewModel {
        filter: input.filter,
        is_empty: items.is_empty(),
        items,
        stats,
        stats_text: stats.summary(),
        theme: Theme::from_dark_mode(input.dark_mode),
        reminder_message: input.reminder_message.map(str::to_string),
    }
}
