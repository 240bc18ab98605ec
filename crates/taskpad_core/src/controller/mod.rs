//! Presentation controller and its UI-facing types.
//!
//! # Responsibility
//! - `app`: the `TodoController` context object owning store, persistence,
//!   notifier and host capabilities.
//! - `dispatch`: closed event enum plus the per-row action table.
//! - `view`: render model (rows, stats text, theme, modal message).
//! - `schedule`, `modal`, `notice`: small state holders used by `app`.
//!
//! # Invariants
//! - Filter and modal state are transient; only tasks and the theme
//!   preference are persisted.

pub mod app;
pub mod dispatch;
pub mod modal;
pub mod notice;
pub mod schedule;
pub mod view;
