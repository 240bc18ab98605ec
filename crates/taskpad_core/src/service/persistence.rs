//! Snapshot persistence over the host key-value store.
//!
//! # Responsibility
//! - Serialize the full task collection and the dark-mode preference.
//! - Absorb storage and decode faults at this boundary.
//!
//! # Invariants
//! - Loads never fail: absence or corruption yields an empty list / unset.
//! - Saves log every fault and hand it back as a value; callers decide how
//!   to notify. In-memory state is never touched here.

use crate::model::task::Task;
use crate::repo::kv_repo::{KeyValueStore, KvError};
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage keys used by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub tasks: String,
    pub dark_mode: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            tasks: crate::config::DEFAULT_TASKS_KEY.to_string(),
            dark_mode: crate::config::DEFAULT_DARK_MODE_KEY.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum PersistenceError {
    Storage(KvError),
    Encode(serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage write failed: {err}"),
            Self::Encode(err) => write!(f, "snapshot encode failed: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for PersistenceError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Mirror of controller state in the host key-value store.
pub struct PersistenceAdapter<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Writes the full collection snapshot.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), PersistenceError> {
        let result = serde_json::to_string(tasks)
            .map_err(PersistenceError::Encode)
            .and_then(|json| {
                self.store
                    .set(&self.keys.tasks, &json)
                    .map_err(PersistenceError::from)
            });
        match &result {
            Ok(()) => debug!(
                "event=tasks_save module=persistence status=ok count={}",
                tasks.len()
            ),
            Err(err) => error!(
                "event=tasks_save module=persistence status=error count={} error={err}",
                tasks.len()
            ),
        }
        result
    }

    /// Reads the collection snapshot; empty on absence or any fault.
    pub fn load_tasks(&self) -> Vec<Task> {
        let raw = match self.store.get(&self.keys.tasks) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!("event=tasks_load module=persistence status=error error_code=read_failed error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                debug!(
                    "event=tasks_load module=persistence status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Err(err) => {
                error!("event=tasks_load module=persistence status=error error_code=decode_failed error={err}");
                Vec::new()
            }
        }
    }

    pub fn save_dark_mode(&self, enabled: bool) -> Result<(), PersistenceError> {
        let value = if enabled { "true" } else { "false" };
        self.store
            .set(&self.keys.dark_mode, value)
            .map_err(|err| {
                error!("event=dark_mode_save module=persistence status=error error={err}");
                PersistenceError::Storage(err)
            })
    }

    /// Tri-state preference: `None` means "never chosen".
    pub fn load_dark_mode(&self) -> Option<bool> {
        match self.store.get(&self.keys.dark_mode) {
            Ok(Some(raw)) => match raw.trim() {
                "true" => Some(true),
                "false" => Some(false),
                other => {
                    warn!(
                        "event=dark_mode_load module=persistence status=error error_code=unrecognized_value len={}",
                        other.len()
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                error!("event=dark_mode_load module=persistence status=error error_code=read_failed error={err}");
                None
            }
        }
    }
}
