use std::collections::HashMap;
use std::sync::RwLock;

use simdiff_types::Dataset;

use crate::error::{StoreError, StoreResult};
use crate::traits::DatasetStore;

/// In-memory, HashMap-based snapshot store.
///
/// Intended for tests and embedding. Snapshots are held as raw text so that
/// parsing follows exactly the same path as for files.
pub struct InMemoryStore {
    texts: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            texts: RwLock::new(HashMap::new()),
        }
    }

    /// Register raw snapshot text under `name`, replacing any previous entry.
    pub fn insert_text(&self, name: impl Into<String>, text: impl Into<String>) {
        self.texts
            .write()
            .expect("lock poisoned")
            .insert(name.into(), text.into());
    }

    /// Register a dataset under `name`, serialized as JSON.
    pub fn insert_dataset(&self, name: impl Into<String>, dataset: &Dataset) -> StoreResult<()> {
        let name = name.into();
        let text = serde_json::to_string(dataset).map_err(|source| StoreError::Format {
            name: name.clone(),
            source,
        })?;
        self.insert_text(name, text);
        Ok(())
    }

    /// Number of registered snapshots.
    pub fn len(&self) -> usize {
        self.texts.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no snapshot is registered.
    pub fn is_empty(&self) -> bool {
        self.texts.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStore for InMemoryStore {
    fn read_text(&self, name: &str) -> StoreResult<String> {
        self.texts
            .read()
            .expect("lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}
