mod support;

use core::time::Duration;
use item_catalog_api::PROCESSED_STATUS;
use item_catalog_batch::{BatchError, FailurePolicy, ItemFailure, ItemOutcome};
use item_catalog_db::models::item::ItemModel;
use item_catalog_db::repository::LoadAll;
use item_catalog_db::InMemoryItemStore;
use std::sync::Arc;
use support::{coordinator, item, pool, settings, InFlight, ScriptedStore};
use tokio::time::{sleep, Instant};
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn test_every_item_is_processed_and_other_fields_kept() {
    let store = Arc::new(InMemoryItemStore::with_items(vec![item(10, 2), item(20, 3)]));
    let batch = coordinator(
        store.clone(),
        pool(4),
        settings(1_000, 30_000, FailurePolicy::RejectBatch),
    );

    let processed = assert_ok!(batch.process_all().await);

    assert_eq!(processed.len(), 2);
    for (result, original) in processed.iter().zip([item(10, 2), item(20, 3)]) {
        assert_eq!(result.status.as_deref(), Some(PROCESSED_STATUS));
        assert_eq!(result.id, original.id);
        assert_eq!(result.name, original.name);
        assert_eq!(result.description, original.description);
        assert_eq!(result.email, original.email);
    }

    let stored = store.load_all().await.unwrap();
    assert!(stored.iter().all(ItemModel::is_processed));
}

#[tokio::test(start_paused = true)]
async fn test_vanished_item_rejects_batch() {
    let store = Arc::new(ScriptedStore::default().vanish(1));
    let batch = coordinator(store, pool(2), settings(100, 1_000, FailurePolicy::RejectBatch));

    let err = assert_err!(batch.process_all().await);

    assert_eq!(err.failed_ids(), vec![1]);
    match err {
        BatchError::Rejected {
            failures,
            processed,
            ..
        } => {
            assert_eq!(failures, vec![ItemFailure::NotFound(1)]);
            assert_eq!(processed, 0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_vanished_item_is_dropped() {
    let store = Arc::new(ScriptedStore::default().vanish(1));
    let batch = coordinator(store, pool(2), settings(100, 1_000, FailurePolicy::DropFailures));

    let processed = assert_ok!(batch.process_all().await);

    assert!(processed.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_pool_bounds_concurrency_and_elapsed_time() {
    let store = Arc::new(ScriptedStore::with_items((1..=5).map(|id| item(id, id as usize))));
    let batch = coordinator(
        store.clone(),
        pool(2),
        settings(100, 1_000, FailurePolicy::RejectBatch),
    );

    let started = Instant::now();
    let processed = assert_ok!(batch.process_all().await);
    let elapsed = started.elapsed();

    assert_eq!(processed.len(), 5);
    assert!(store.peak_in_flight() <= 2);
    assert!(elapsed >= Duration::from_millis(300), "took {elapsed:?}");
    assert!(elapsed < Duration::from_millis(400), "took {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_batches_keep_their_own_items() {
    let shared = pool(2);
    let gauge = Arc::new(InFlight::default());
    let first = coordinator(
        Arc::new(
            ScriptedStore::with_items((1..=3).map(|id| item(id, 1))).share_gauge(gauge.clone()),
        ),
        shared.clone(),
        settings(50, 1_000, FailurePolicy::RejectBatch),
    );
    let second = coordinator(
        Arc::new(
            ScriptedStore::with_items((100..=102).map(|id| item(id, 2)))
                .share_gauge(gauge.clone()),
        ),
        shared,
        settings(50, 1_000, FailurePolicy::RejectBatch),
    );

    let started = Instant::now();
    let (a, b) = tokio::join!(first.process_all(), second.process_all());
    let elapsed = started.elapsed();

    let ids = |items: Vec<ItemModel>| -> Vec<i64> {
        items.into_iter().filter_map(|item| item.id).collect()
    };
    assert_eq!(ids(a.unwrap()), vec![1, 2, 3]);
    assert_eq!(ids(b.unwrap()), vec![100, 101, 102]);

    // Six items on two workers, whichever batch they belong to
    assert_eq!(gauge.peak(), 2);
    assert!(elapsed >= Duration::from_millis(150), "took {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_failed_save_does_not_affect_siblings() {
    let store =
        Arc::new(ScriptedStore::with_items((1..=3).map(|id| item(id, id as usize))).fail_save(2));
    let batch = coordinator(
        store.clone(),
        pool(3),
        settings(100, 1_000, FailurePolicy::DropFailures),
    );

    let report = assert_ok!(batch.run_batch(&CancellationToken::new()).await);

    assert!(!report.is_complete());
    assert_eq!(
        report.outcomes[1],
        ItemOutcome::Failed(ItemFailure::Persistence {
            id: 2,
            cause: "disk full".to_string()
        })
    );
    assert!(store.stored(1).await.unwrap().is_processed());
    assert!(!store.stored(2).await.unwrap().is_processed());
    assert!(store.stored(3).await.unwrap().is_processed());
}

#[tokio::test(start_paused = true)]
async fn test_hanging_load_times_out() {
    let store = Arc::new(ScriptedStore::with_items(vec![item(1, 1), item(2, 2)]).hang_load(1));
    let batch = coordinator(store, pool(2), settings(100, 500, FailurePolicy::DropFailures));

    let report = assert_ok!(batch.run_batch(&CancellationToken::new()).await);

    assert_eq!(
        report.outcomes[0],
        ItemOutcome::Failed(ItemFailure::Timeout {
            id: 1,
            after: Duration::from_millis(500)
        })
    );
    assert!(report.outcomes[1].is_processed());
}

#[tokio::test(start_paused = true)]
async fn test_panicking_task_is_aborted() {
    let store =
        Arc::new(ScriptedStore::with_items(vec![item(1, 1), item(2, 2)]).panic_on_load(2));
    let batch = coordinator(store, pool(1), settings(100, 1_000, FailurePolicy::RejectBatch));

    let report = assert_ok!(batch.run_batch(&CancellationToken::new()).await);

    assert!(report.outcomes[0].is_processed());
    assert_eq!(report.outcomes[1], ItemOutcome::Failed(ItemFailure::Aborted(2)));
}

#[tokio::test(start_paused = true)]
async fn test_caller_cancellation_stops_pending_items() {
    let store = Arc::new(ScriptedStore::with_items((1..=3).map(|id| item(id, id as usize))));
    let batch = coordinator(
        store.clone(),
        pool(1),
        settings(10_000, 60_000, FailurePolicy::RejectBatch),
    );
    let cancel = CancellationToken::new();

    let running = tokio::spawn({
        let batch = batch.clone();
        let cancel = cancel.clone();
        async move { batch.process_all_with(&cancel).await }
    });
    sleep(Duration::from_millis(10)).await;
    cancel.cancel();

    let err = assert_err!(running.await.unwrap());
    assert_eq!(err.failed_ids(), vec![1, 2, 3]);
    for id in 1..=3 {
        assert!(!store.stored(id).await.unwrap().is_processed());
    }
}

#[tokio::test(start_paused = true)]
async fn test_pool_shutdown_cancels_running_batch() {
    let shared = pool(1);
    let batch = coordinator(
        Arc::new(ScriptedStore::with_items((1..=3).map(|id| item(id, id as usize)))),
        shared.clone(),
        settings(10_000, 60_000, FailurePolicy::DropFailures),
    );

    let running = tokio::spawn({
        let batch = batch.clone();
        async move { batch.run_batch(&CancellationToken::new()).await }
    });
    sleep(Duration::from_millis(10)).await;
    assert_ok!(shared.shutdown().await);

    let report = assert_ok!(running.await.unwrap());
    assert_eq!(
        report.outcomes,
        (1..=3)
            .map(|id| ItemOutcome::Failed(ItemFailure::Cancelled(id)))
            .collect::<Vec<_>>()
    );

    assert!(matches!(
        batch.process_all().await,
        Err(BatchError::Pool(_))
    ));
}

#[tokio::test]
async fn test_snapshot_failure_starts_no_task() {
    let store = Arc::new(ScriptedStore::with_items(vec![item(1, 1)]).fail_list());
    let batch = coordinator(
        store.clone(),
        pool(1),
        settings(10, 1_000, FailurePolicy::DropFailures),
    );

    let err = assert_err!(batch.process_all().await);

    assert!(matches!(err, BatchError::Snapshot(ref cause) if cause == "connection refused"));
    assert!(!store.stored(1).await.unwrap().is_processed());
}

#[tokio::test(start_paused = true)]
async fn test_empty_store_yields_empty_batch() {
    let batch = coordinator(
        Arc::new(InMemoryItemStore::new()),
        pool(2),
        settings(100, 1_000, FailurePolicy::RejectBatch),
    );

    assert!(assert_ok!(batch.process_all().await).is_empty());
}
