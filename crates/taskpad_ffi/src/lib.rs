//! Flutter-facing bindings for the Taskpad core.
//!
//! Every exported function lives in `api` and is a sync FRB call.

pub mod api;
