//! Host environment seams.
//!
//! # Responsibility
//! - Describe what the host grants (notification permission, system theme).
//! - Define the notification side channel and wall-clock helpers.
//!
//! # Invariants
//! - Core logic never probes ambient globals; hosts pass capabilities in.

pub mod capability;
pub mod clock;
