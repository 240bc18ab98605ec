//! Use-case services over the task collection.
//!
//! # Responsibility
//! - `task_store`: authoritative in-memory list, filtering, stats.
//! - `persistence`: snapshot mirror in the host key-value store.
//! - `backup`: export document and validated import.

pub mod backup;
pub mod persistence;
pub mod task_store;
