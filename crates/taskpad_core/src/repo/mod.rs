//! Host key-value store contracts and implementations.
//!
//! # Responsibility
//! - Define the get/set/remove contract the host storage must satisfy.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Values are opaque UTF-8 text; the store never interprets them.
//! - A failed `set` leaves the previous value for that key in place.

pub mod kv_repo;
