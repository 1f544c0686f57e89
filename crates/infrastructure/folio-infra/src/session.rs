use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_app_core::ports::SessionStoragePort;

/// Tab-scoped key/value storage. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemorySessionStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn remove_item(&self, key: &str) -> Option<String> {
        self.items().remove(key)
    }

    pub fn clear(&self) {
        self.items().clear();
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl SessionStoragePort for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_items() {
        let storage = MemorySessionStorage::new();
        let other = storage.clone();
        other.set_item("k", "v").unwrap();

        assert_eq!(storage.get_item("k").as_deref(), Some("v"));
        assert_eq!(storage.remove_item("k").as_deref(), Some("v"));
        assert!(storage.is_empty());

        other.set_item("a", "1").unwrap();
        storage.clear();
        assert_eq!(other.len(), 0);
    }
}
