//! In-memory item store
//!
//! Default backend when no database is configured. Mirrors the constraint
//! semantics of the database backend, including email uniqueness.

use crate::core::items::types::{Item, NewItem};
use crate::storage::ItemStore;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Map-backed store with an atomic id sequence
#[derive(Debug)]
pub struct MemoryItemStore {
    items: RwLock<HashMap<i64, Item>>,
    next_id: AtomicI64,
}

impl MemoryItemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn find_all(&self) -> Result<Vec<Item>> {
        let items = self.items.read();
        let mut all: Vec<Item> = items.values().cloned().collect();
        all.sort_by_key(|item| item.id);
        Ok(all)
    }

    async fn find_all_ids(&self) -> Result<Vec<i64>> {
        let items = self.items.read();
        let mut ids: Vec<i64> = items.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        Ok(self.items.read().get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.items.read().contains_key(&id))
    }

    async fn create(&self, item: NewItem) -> Result<Item> {
        let mut items = self.items.write();
        if items.values().any(|existing| existing.email == item.email) {
            return Err(ServiceError::conflict(format!(
                "email '{}' is already in use",
                item.email
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Item {
            id,
            name: item.name,
            description: item.description,
            status: item.status,
            email: item.email,
        };
        items.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, item: Item) -> Result<Item> {
        let mut items = self.items.write();
        if !items.contains_key(&item.id) {
            return Err(ServiceError::not_found(format!(
                "item {} does not exist",
                item.id
            )));
        }
        if items
            .values()
            .any(|existing| existing.email == item.email && existing.id != item.id)
        {
            return Err(ServiceError::conflict(format!(
                "email '{}' is already in use",
                item.email
            )));
        }

        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.items.write().remove(&id);
        Ok(())
    }
}
