//! Reminder eligibility evaluator.
//!
//! A task is eligible when it is open, has a due date, has not reminded
//! before, and its floored minute distance to the due date lies inside
//! `[-overdue_grace_minutes, lead_minutes]`. Tasks further overdue than the
//! grace period never remind.

use crate::model::task::{Task, TaskId};

pub const MINUTE_MS: i64 = 60_000;

/// Inclusive reminder window around a due date, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    pub lead_minutes: i64,
    pub overdue_grace_minutes: i64,
}

impl Default for ReminderWindow {
    fn default() -> Self {
        Self {
            lead_minutes: 30,
            overdue_grace_minutes: 60,
        }
    }
}

impl ReminderWindow {
    pub fn contains(&self, minutes_until_due: i64) -> bool {
        minutes_until_due <= self.lead_minutes && minutes_until_due >= -self.overdue_grace_minutes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderUrgency {
    Overdue,
    DueSoon,
}

/// One reminder to surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub task_id: TaskId,
    pub urgency: ReminderUrgency,
    pub message: String,
}

/// `floor((due - now) / 1 minute)`, saturating at the i64 range.
pub fn minutes_until(due_ms: i64, now_ms: i64) -> i64 {
    due_ms.saturating_sub(now_ms).div_euclid(MINUTE_MS)
}

/// Returns the reminder `task` should raise at `now_ms`, if any.
pub fn evaluate_reminder(task: &Task, now_ms: i64, window: ReminderWindow) -> Option<Reminder> {
    if task.completed || task.reminder_shown {
        return None;
    }
    let due_ms = task.due_date?;
    if !window.contains(minutes_until(due_ms, now_ms)) {
        return None;
    }

    let urgency = if due_ms < now_ms {
        ReminderUrgency::Overdue
    } else {
        ReminderUrgency::DueSoon
    };
    Some(Reminder {
        task_id: task.id.clone(),
        urgency,
        message: reminder_message(&task.content, urgency),
    })
}

/// Evaluates every task, keeping collection order.
pub fn scan_reminders(tasks: &[Task], now_ms: i64, window: ReminderWindow) -> Vec<Reminder> {
    tasks
        .iter()
        .filter_map(|task| evaluate_reminder(task, now_ms, window))
        .collect()
}

pub fn reminder_message(content: &str, urgency: ReminderUrgency) -> String {
    match urgency {
        ReminderUrgency::Overdue => format!("⚠️ Task \"{content}\" is overdue!"),
        ReminderUrgency::DueSoon => format!("📅 Task \"{content}\" is due soon!"),
    }
}
