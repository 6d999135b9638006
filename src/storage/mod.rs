pub mod json_store;
pub mod snapshot;

use std::collections::BTreeMap;

use crate::errors::Result;

/// String-keyed store holding string values, in the manner of browser local
/// storage. Writes are expected to be durable once `set` returns.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

pub use json_store::JsonFileStore;
pub use snapshot::{
    clear_snapshot, load_snapshot, save_snapshot, LoadReport, BALANCE_KEY, BUDGET_KEY,
    ITEM_LIST_KEY,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("budget").unwrap(), None);
        store.set("budget", "100").unwrap();
        assert_eq!(store.get("budget").unwrap().as_deref(), Some("100"));
        store.remove("budget").unwrap();
        assert!(store.is_empty());
    }
}
