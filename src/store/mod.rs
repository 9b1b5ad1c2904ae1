// Selection store module.
// Persists the selected tab id per tab group across sessions.

pub mod backend;
pub mod paths;
pub mod selection;

pub use backend::{FileStorage, MemoryStorage, Storage};
pub use selection::{STORAGE_KEY, SelectionMap, SelectionStore, SubscriptionId};
