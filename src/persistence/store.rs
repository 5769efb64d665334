use super::kv::KeyValueStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{error, warn};

/// Storage key for the task collection
pub const TASKS_KEY: &str = "weekly-planner-data";

/// Storage key for the event collection
pub const EVENTS_KEY: &str = "weekly-planner-events";

/// Storage key for the predefined-task collection
pub const PREDEFINED_KEY: &str = "weekly-planner-predefined-tasks";

/// Load/save cycle for one record collection under a fixed storage key.
///
/// Failures never reach the caller: a missing or undecodable payload loads
/// as an empty collection, and a failed write leaves the in-memory state
/// authoritative for the session. `save` is inert until `load` has run,
/// so a startup race can never clobber stored data with an empty list.
pub struct CollectionStore<T> {
    storage: Arc<dyn KeyValueStorage>,
    key: &'static str,
    loaded: bool,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> CollectionStore<T> {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: &'static str) -> Self {
        Self {
            storage,
            key,
            loaded: false,
            _marker: PhantomData,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Read and deserialize the full collection. Absent key or a broken
    /// payload yields an empty collection.
    pub fn load(&mut self) -> Vec<T> {
        self.loaded = true;

        let payload = match self.storage.get(self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = self.key, error = %e, "storage read failed, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&payload) {
            Ok(records) => records,
            Err(e) => {
                warn!(key = self.key, error = %e, "stored collection undecodable, starting empty");
                Vec::new()
            }
        }
    }

    /// Serialize and overwrite the stored collection
    pub fn save(&self, records: &[T]) {
        if !self.loaded {
            warn!(key = self.key, "save before initial load skipped");
            return;
        }

        let payload = match serde_json::to_string(records) {
            Ok(payload) => payload,
            Err(e) => {
                error!(key = self.key, error = %e, "failed to serialize collection");
                return;
            }
        };

        if let Err(e) = self.storage.set(self.key, &payload) {
            error!(key = self.key, error = %e, "storage write failed, in-memory state kept");
        }
    }
}
