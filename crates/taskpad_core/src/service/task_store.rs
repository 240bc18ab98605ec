//! In-memory task collection with list operations.
//!
//! # Responsibility
//! - Own the authoritative task list for a session.
//! - Provide create/toggle/delete with most-recent-first ordering.
//! - Provide order-preserving filtering and summary stats.
//!
//! # Invariants
//! - New tasks are inserted at index 0.
//! - Lookup misses are silent no-ops, never errors.
//! - Ids are unique within the collection.

use crate::model::filter::FilterCriterion;
use crate::model::task::{Category, Task, TaskId};

/// Owner of the in-memory task collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a loaded snapshot, keeping its order.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Creates a task at the front of the list.
    ///
    /// Returns `None` (and leaves the list untouched) when `content` trims
    /// to empty.
    pub fn add(
        &mut self,
        content: &str,
        category: Category,
        due_date: Option<i64>,
        now_ms: i64,
    ) -> Option<&Task> {
        let mut task = Task::new(content, category, due_date, now_ms).ok()?;
        while self.contains(&task.id) {
            task.id = crate::model::task::generate_task_id(now_ms);
        }
        self.tasks.insert(0, task);
        self.tasks.first()
    }

    /// Flips completion of `id`. Returns the new state, or `None` on miss.
    pub fn toggle_complete(&mut self, id: &str, now_ms: i64) -> Option<bool> {
        self.get_mut(id).map(|task| task.toggle_complete(now_ms))
    }

    /// Removes `id` and returns the removed task.
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Sets the reminder flag. Returns `true` only on a false→true change.
    pub fn mark_reminder_shown(&mut self, id: &str) -> bool {
        self.get_mut(id)
            .map(Task::mark_reminder_shown)
            .unwrap_or(false)
    }

    /// Replaces the whole collection (import path, no merge).
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|task| task.id.clone()).collect()
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }
}

/// Returns the tasks matching `criterion`, in collection order.
pub fn filter_tasks(tasks: &[Task], criterion: FilterCriterion) -> Vec<&Task> {
    tasks.iter().filter(|task| criterion.matches(task)).collect()
}

/// Counts shown in the list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total,
            pending: total - completed,
            completed,
        }
    }

    /// Header text, e.g. `3 tasks (2 pending, 1 completed)`.
    pub fn summary(&self) -> String {
        if self.total == 0 {
            return "0 tasks".to_string();
        }
        let plural = if self.total == 1 { "" } else { "s" };
        format!(
            "{} task{plural} ({} pending, {} completed)",
            self.total, self.pending, self.completed
        )
    }
}
