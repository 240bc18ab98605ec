//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the persisted `Task` record and its category set.
//! - Define filter criteria used by list rendering.
//!
//! # Invariants
//! - A task has exactly one category; category is not a set.
//! - Completion state and `completed_at` always agree.

pub mod filter;
pub mod task;
