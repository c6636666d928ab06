//! In-memory room store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{RoomStore, StoreResult};

/// Room documents held in a map. Lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    docs: RwLock<HashMap<String, String>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn load(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.docs.read().await.get(name).cloned())
    }

    async fn save(&self, name: &str, doc: &str) -> StoreResult<()> {
        self.docs
            .write()
            .await
            .insert(name.to_string(), doc.to_string());
        Ok(())
    }

    async fn delete(&self, name: &str) -> StoreResult<bool> {
        Ok(self.docs.write().await.remove(name).is_some())
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.docs.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_load_delete() {
        let store = MemoryRoomStore::new();
        assert_eq!(store.load("a").await.unwrap(), None);

        store.save("a", "{\"x\":1}").await.unwrap();
        store.save("a", "{\"x\":2}").await.unwrap();
        assert_eq!(store.load("a").await.unwrap().as_deref(), Some("{\"x\":2}"));

        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let store = MemoryRoomStore::new();
        store.save("zeta", "{}").await.unwrap();
        store.save("alfa", "{}").await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec!["alfa", "zeta"]);
    }
}
