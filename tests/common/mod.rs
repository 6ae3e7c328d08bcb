//! Shared test fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use itemflow::config::ProcessingConfig;
use itemflow::core::items::types::{Item, NewItem};
use itemflow::storage::memory::MemoryItemStore;
use itemflow::utils::error::Result;
use itemflow::{EmailValidator, ItemService, ItemStatus, ItemStore, MxResolver, ServiceError};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Store wrapper that fails selected operations on demand.
///
/// Delegates to an in-memory store; saves for registered ids fail with a
/// conflict, and `break_find_all` turns the bulk read into a database error.
pub struct FlakyStore {
    inner: MemoryItemStore,
    failing_saves: Mutex<HashSet<i64>>,
    broken_find_all: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryItemStore::new(),
            failing_saves: Mutex::new(HashSet::new()),
            broken_find_all: AtomicBool::new(false),
        }
    }

    /// Make every save of the given id fail with a conflict
    pub fn fail_saves_for(&self, id: i64) {
        self.failing_saves.lock().insert(id);
    }

    /// Make `find_all` fail with an internal error
    pub fn break_find_all(&self) {
        self.broken_find_all.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemStore for FlakyStore {
    async fn find_all(&self) -> Result<Vec<Item>> {
        if self.broken_find_all.load(Ordering::SeqCst) {
            return Err(ServiceError::internal("bulk read failed"));
        }
        self.inner.find_all().await
    }

    async fn find_all_ids(&self) -> Result<Vec<i64>> {
        self.inner.find_all_ids().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        self.inner.find_by_id(id).await
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        self.inner.exists(id).await
    }

    async fn create(&self, item: NewItem) -> Result<Item> {
        self.inner.create(item).await
    }

    async fn save(&self, item: Item) -> Result<Item> {
        if self.failing_saves.lock().contains(&item.id) {
            return Err(ServiceError::conflict(format!(
                "email '{}' is already in use",
                item.email
            )));
        }
        self.inner.save(item).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner.delete(id).await
    }
}

/// Scriptable resolver that counts lookups
pub struct StubResolver {
    records: Vec<String>,
    fail: bool,
    calls: AtomicUsize,
}

impl StubResolver {
    /// Resolver answering every domain with one MX record
    pub fn accepting() -> Self {
        Self {
            records: vec!["mx.example.org.".to_string()],
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Resolver answering every domain with an empty record set
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Resolver failing every lookup
    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MxResolver for StubResolver {
    async fn lookup_mx(&self, _domain: &str) -> anyhow::Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("resolution failed");
        }
        Ok(self.records.clone())
    }
}

/// Item service over the given store, accepting every email
pub fn service_over(store: Arc<dyn ItemStore>) -> ItemService {
    ItemService::new(
        store,
        EmailValidator::new(Arc::new(StubResolver::accepting())),
        ProcessingConfig::default(),
    )
}

/// A NEW item draft with the given name and email
pub fn draft(name: &str, email: &str) -> NewItem {
    NewItem {
        name: name.to_string(),
        description: None,
        status: ItemStatus::New,
        email: email.to_string(),
    }
}
