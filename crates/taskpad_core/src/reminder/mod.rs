//! Due-date urgency and reminder eligibility.
//!
//! # Responsibility
//! - Decide whether a task should raise a reminder at a given instant.
//! - Classify due dates for display labels.
//!
//! # Invariants
//! - Every function here is pure over `(task, now)`; nothing mutates tasks.

pub mod due_label;
pub mod evaluator;
