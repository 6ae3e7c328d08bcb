//! Storage layer for the item service
//!
//! Persistence sits behind the [`ItemStore`] trait so the service and tests
//! can run against different backends. Each save is atomic and isolated on
//! its own; the store never groups writes across items.

pub mod database;
pub mod memory;

use crate::config::StorageConfig;
use crate::core::items::types::{Item, NewItem};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Durable keyed storage for item records
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items currently persisted
    async fn find_all(&self) -> Result<Vec<Item>>;

    /// All item identifiers, without loading full rows
    async fn find_all_ids(&self) -> Result<Vec<i64>>;

    /// Look up a single item
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>>;

    /// Whether an item with the given identifier exists
    async fn exists(&self, id: i64) -> Result<bool>;

    /// Persist a new item, assigning its identifier.
    ///
    /// # Errors
    /// [`ServiceError::Conflict`](crate::utils::error::ServiceError) when
    /// the email is already taken.
    async fn create(&self, item: NewItem) -> Result<Item>;

    /// Persist the given state of an existing item.
    ///
    /// # Errors
    /// Conflict on a uniqueness violation, not-found when the identifier
    /// does not resolve.
    async fn save(&self, item: Item) -> Result<Item>;

    /// Remove an item; removing an absent identifier is a no-op
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Build the store backend selected by configuration
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn ItemStore>> {
    if config.database.enabled {
        info!("Initializing database-backed item store");
        let store = database::DatabaseItemStore::connect(&config.database).await?;
        store.migrate().await?;
        Ok(Arc::new(store))
    } else {
        info!("Database disabled, using in-memory item store");
        Ok(Arc::new(memory::MemoryItemStore::new()))
    }
}
