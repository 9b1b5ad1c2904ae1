// Persisted tab selection store.
// Maps tab group identifiers to the selected tab id and notifies subscribers on change.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::backend::Storage;

/// Fixed key the whole selection map is stored under.
pub const STORAGE_KEY: &str = "tab-storage";

/// Blob format version. Blobs written with any other version are discarded.
const BLOB_VERSION: u32 = 0;

/// Tab group identifier -> selected tab id.
pub type SelectionMap = BTreeMap<String, String>;

/// Handle returned by [`SelectionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SelectionMap)>;

/// On-disk envelope around the selection map.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedBlob {
    state: PersistedState,
    version: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    #[serde(default)]
    active_tabs: SelectionMap,
}

/// Process-wide selection state. Construct once at startup and hand out by reference.
pub struct SelectionStore<S: Storage> {
    storage: S,
    selections: SelectionMap,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: Storage> SelectionStore<S> {
    /// Open the store, loading the persisted map or starting empty.
    pub fn open(storage: S) -> Self {
        let selections = load_selections(&storage);
        Self {
            storage,
            selections,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Selected tab id for a group, if one was ever set.
    pub fn get(&self, group: &str) -> Option<&str> {
        self.selections.get(group).map(String::as_str)
    }

    /// Record the selected tab for a group, persist the map, and notify subscribers.
    ///
    /// The in-memory map and subscribers are updated even if the write fails;
    /// the storage error is returned afterwards.
    pub fn set(&mut self, group: impl Into<String>, tab_id: impl Into<String>) -> Result<()> {
        let group = group.into();
        let tab_id = tab_id.into();
        tracing::debug!(group = %group, tab_id = %tab_id, "Selection updated");
        self.selections.insert(group, tab_id);

        let persisted = self.persist();
        if let Err(e) = &persisted {
            tracing::warn!("Failed to persist tab selections: {}", e);
        }

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.selections);
        }

        persisted
    }

    /// Register a callback invoked synchronously after every `set`.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&SelectionMap) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Current contents of the map.
    pub fn snapshot(&self) -> &SelectionMap {
        &self.selections
    }

    /// Discard in-memory state and load again from storage.
    pub fn reload(&mut self) {
        self.selections = load_selections(&self.storage);
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) -> Result<()> {
        let blob = PersistedBlob {
            state: PersistedState {
                active_tabs: self.selections.clone(),
            },
            version: BLOB_VERSION,
        };
        let json = serde_json::to_string(&blob)?;
        self.storage.write(STORAGE_KEY, &json)
    }
}

impl<S: Storage> fmt::Debug for SelectionStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("selections", &self.selections)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Load the persisted map. Absent, unreadable, corrupt, or foreign-version
/// blobs all yield an empty map.
fn load_selections<S: Storage>(storage: &S) -> SelectionMap {
    let contents = match storage.read(STORAGE_KEY) {
        Ok(Some(contents)) => contents,
        Ok(None) => return SelectionMap::new(),
        Err(e) => {
            tracing::warn!("Failed to read tab selections, starting empty: {}", e);
            return SelectionMap::new();
        }
    };

    match serde_json::from_str::<PersistedBlob>(&contents) {
        Ok(blob) if blob.version == BLOB_VERSION => {
            tracing::info!(entries = blob.state.active_tabs.len(), "Loaded tab selections");
            blob.state.active_tabs
        }
        Ok(blob) => {
            tracing::warn!(version = blob.version, "Discarding tab selections with unknown version");
            SelectionMap::new()
        }
        Err(e) => {
            tracing::warn!("Discarding corrupt tab selections: {}", e);
            SelectionMap::new()
        }
    }
}
