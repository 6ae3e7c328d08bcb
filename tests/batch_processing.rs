//! Batch processing behavior
//!
//! Exercises the all-items sweep against a failure-injecting store: per-item
//! isolation, status transitions, ordering, and idempotence.

mod common;

use common::{FlakyStore, draft, service_over};
use itemflow::{ItemStatus, ItemStore, ServiceError};
use std::sync::Arc;

#[tokio::test]
async fn batch_excludes_exactly_the_failing_items() {
    let store = Arc::new(FlakyStore::new());
    let a = store.create(draft("a", "a@example.org")).await.unwrap();
    let b = store.create(draft("b", "b@example.org")).await.unwrap();
    let c = store.create(draft("c", "c@example.org")).await.unwrap();
    store.fail_saves_for(b.id);

    let service = service_over(store.clone());
    let processed = service.process_items().await.unwrap();

    let ids: Vec<i64> = processed.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![a.id, c.id]);
    assert!(processed.iter().all(|i| i.status == ItemStatus::Processed));

    // the failing item keeps its previous persisted state
    let persisted_b = store.find_by_id(b.id).await.unwrap().unwrap();
    assert_eq!(persisted_b.status, ItemStatus::New);
}

#[tokio::test]
async fn batch_with_all_failures_returns_empty_list() {
    let store = Arc::new(FlakyStore::new());
    for n in 0..4 {
        let item = store
            .create(draft(&format!("item-{}", n), &format!("u{}@example.org", n)))
            .await
            .unwrap();
        store.fail_saves_for(item.id);
    }

    let service = service_over(store.clone());
    let processed = service.process_items().await.unwrap();

    assert!(processed.is_empty());
    for item in store.find_all().await.unwrap() {
        assert_eq!(item.status, ItemStatus::New);
    }
}

#[tokio::test]
async fn batch_with_no_failures_returns_every_item() {
    let store = Arc::new(FlakyStore::new());
    for n in 0..5 {
        store
            .create(draft(&format!("item-{}", n), &format!("u{}@example.org", n)))
            .await
            .unwrap();
    }

    let service = service_over(store.clone());
    let processed = service.process_items().await.unwrap();

    assert_eq!(processed.len(), 5);
    assert!(processed.iter().all(|i| i.status == ItemStatus::Processed));
}

#[tokio::test]
async fn early_failure_does_not_block_later_items() {
    let store = Arc::new(FlakyStore::new());
    let first = store.create(draft("first", "first@example.org")).await.unwrap();
    store.fail_saves_for(first.id);
    for n in 0..8 {
        store
            .create(draft(&format!("later-{}", n), &format!("l{}@example.org", n)))
            .await
            .unwrap();
    }

    let service = service_over(store.clone());
    let processed = service.process_items().await.unwrap();

    assert_eq!(processed.len(), 8);
    assert!(processed.iter().all(|i| i.id != first.id));
}

#[tokio::test]
async fn batch_result_preserves_store_order() {
    let store = Arc::new(FlakyStore::new());
    let mut expected = Vec::new();
    for n in 0..10 {
        let item = store
            .create(draft(&format!("item-{}", n), &format!("o{}@example.org", n)))
            .await
            .unwrap();
        expected.push(item.id);
    }

    let service = service_over(store);
    let processed = service.process_items().await.unwrap();

    let ids: Vec<i64> = processed.iter().map(|i| i.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn rerunning_batch_is_idempotent() {
    let store = Arc::new(FlakyStore::new());
    store.create(draft("a", "a@example.org")).await.unwrap();
    store.create(draft("b", "b@example.org")).await.unwrap();

    let service = service_over(store.clone());
    let first = service.process_items().await.unwrap();
    let second = service.process_items().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(second.iter().all(|i| i.status == ItemStatus::Processed));
}

#[tokio::test]
async fn failed_bulk_read_fails_the_whole_operation() {
    let store = Arc::new(FlakyStore::new());
    store.create(draft("a", "a@example.org")).await.unwrap();
    store.break_find_all();

    let service = service_over(store);
    let err = service.process_items().await.unwrap_err();
    assert!(matches!(err, ServiceError::Internal(_)));
}

// The end-to-end example from the service contract: two NEW items, the
// second one's save conflicts, the batch returns only the first.
#[tokio::test]
async fn conflicting_save_is_logged_and_excluded() {
    let store = Arc::new(FlakyStore::new());
    let a = store.create(draft("a", "a@example.org")).await.unwrap();
    let b = store.create(draft("b", "b@example.org")).await.unwrap();
    store.fail_saves_for(b.id);

    let service = service_over(store);
    let processed = service.process_items().await.unwrap();

    assert_eq!(processed.len(), 1);
    assert_eq!(processed[0].id, a.id);
    assert_eq!(processed[0].status, ItemStatus::Processed);
}
