//! Item business operations
//!
//! CRUD delegation to the store, request validation, and the parallel
//! batch sweep that transitions every item to `PROCESSED`.

use crate::config::ProcessingConfig;
use crate::core::batch;
use crate::core::items::types::{Item, ItemRequest, ItemStatus};
use crate::core::validation::email::EmailValidator;
use crate::storage::ItemStore;
use crate::utils::error::{Result, ServiceError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Service layer handling item business operations
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    email: EmailValidator,
    processing: ProcessingConfig,
}

impl ItemService {
    /// Create a new service over the given store and validator
    pub fn new(
        store: Arc<dyn ItemStore>,
        email: EmailValidator,
        processing: ProcessingConfig,
    ) -> Self {
        Self {
            store,
            email,
            processing,
        }
    }

    /// Retrieve all items
    pub async fn find_all(&self) -> Result<Vec<Item>> {
        self.store.find_all().await
    }

    /// Find an item by its identifier
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        self.store.find_by_id(id).await
    }

    /// Check whether an item exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        self.store.exists(id).await
    }

    /// Number of items currently persisted
    pub async fn count(&self) -> Result<usize> {
        Ok(self.store.find_all_ids().await?.len())
    }

    /// Validate and persist a new item.
    ///
    /// Validation runs before any side effect; an invalid request never
    /// reaches the store.
    pub async fn create(&self, request: ItemRequest) -> Result<Item> {
        let draft = request.validate(&self.email).await?;
        let item = self.store.create(draft).await?;
        debug!(item_id = item.id, "created item");
        Ok(item)
    }

    /// Validate and apply an update to an existing item
    pub async fn update(&self, id: i64, request: ItemRequest) -> Result<Item> {
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item not found"))?;

        let draft = request.validate(&self.email).await?;
        let updated = Item {
            id: existing.id,
            name: draft.name,
            description: draft.description,
            status: draft.status,
            email: draft.email,
        };
        let saved = self.store.save(updated).await?;
        debug!(item_id = saved.id, "updated item");
        Ok(saved)
    }

    /// Delete an item by its identifier
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.exists(id).await? {
            return Err(ServiceError::not_found("Item not found"));
        }
        self.store.delete(id).await?;
        debug!(item_id = id, "deleted item");
        Ok(())
    }

    /// Process all items in parallel and collect only the successes.
    ///
    /// Every item currently in the store gets an independent concurrent
    /// task that sets its status to `PROCESSED` and persists it. A failed
    /// save is logged with the item's identifier and excluded from the
    /// result; it never aborts the sweep. Only a failure of the initial
    /// bulk read fails the whole operation.
    ///
    /// The returned items appear in store order and all carry
    /// `ItemStatus::Processed`.
    pub async fn process_items(&self) -> Result<Vec<Item>> {
        let items = self.store.find_all().await?;
        let total = items.len();
        let ids: Vec<i64> = items.iter().map(|item| item.id).collect();

        let store = Arc::clone(&self.store);
        let reports = batch::settle_all(
            items,
            move |mut item: Item| {
                let store = Arc::clone(&store);
                async move {
                    item.status = ItemStatus::Processed;
                    store.save(item).await
                }
            },
            self.processing.concurrency,
        )
        .await;

        let mut processed = Vec::with_capacity(total);
        for report in reports {
            match report.result {
                Ok(item) => processed.push(item),
                Err(e) => {
                    let item_id = ids
                        .get(report.index)
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    warn!(item_id = %item_id, error = %e, "failed to process item");
                }
            }
        }

        info!(
            total,
            succeeded = processed.len(),
            "batch processing settled"
        );
        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::items::types::NewItem;
    use crate::core::validation::email::MockMxResolver;
    use crate::storage::memory::MemoryItemStore;

    fn service_with(store: Arc<dyn ItemStore>) -> ItemService {
        let mut resolver = MockMxResolver::new();
        resolver
            .expect_lookup_mx()
            .returning(|_| Ok(vec!["mx.example.org.".to_string()]));
        ItemService::new(
            store,
            EmailValidator::new(Arc::new(resolver)),
            ProcessingConfig::default(),
        )
    }

    fn new_item(name: &str, email: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            description: None,
            status: ItemStatus::New,
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_validates_before_persisting() {
        let store = Arc::new(MemoryItemStore::new());
        let service = service_with(store.clone());

        let err = service.create(ItemRequest::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let service = service_with(Arc::new(MemoryItemStore::new()));

        let request = ItemRequest {
            name: Some("Widget".to_string()),
            description: None,
            status: Some("NEW".to_string()),
            email: Some("user@example.org".to_string()),
        };
        let err = service.update(42, request).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let service = service_with(Arc::new(MemoryItemStore::new()));
        let err = service.delete(7).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_process_items_marks_everything_processed() {
        let store = Arc::new(MemoryItemStore::new());
        store.create(new_item("a", "a@example.org")).await.unwrap();
        store.create(new_item("b", "b@example.org")).await.unwrap();
        let service = service_with(store.clone());

        let processed = service.process_items().await.unwrap();

        assert_eq!(processed.len(), 2);
        assert!(processed.iter().all(|i| i.status == ItemStatus::Processed));
        // persisted state reflects the transition
        for item in store.find_all().await.unwrap() {
            assert_eq!(item.status, ItemStatus::Processed);
        }
    }

    #[tokio::test]
    async fn test_process_items_empty_store_yields_empty_result() {
        let service = service_with(Arc::new(MemoryItemStore::new()));
        let processed = service.process_items().await.unwrap();
        assert!(processed.is_empty());
    }
}
