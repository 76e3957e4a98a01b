#![allow(dead_code)]

use async_trait::async_trait;
use core::time::Duration;
use item_catalog_api::ItemId;
use item_catalog_batch::{BatchCoordinator, BatchSettings, FailurePolicy, WorkerPool};
use item_catalog_db::models::item::ItemModel;
use item_catalog_db::repository::{Delete, ListIds, Load, LoadAll, Save};
use item_catalog_db::InMemoryItemStore;
use std::collections::HashSet;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub type StoreResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

pub fn item(id: ItemId, n: usize) -> ItemModel {
    ItemModel::new(
        &format!("name{n}"),
        &format!("description{n}"),
        &format!("ex{n}@gmail.com"),
    )
    .unwrap()
    .with_id(id)
}

pub fn settings(delay_ms: u64, timeout_ms: u64, failure_policy: FailurePolicy) -> BatchSettings {
    BatchSettings {
        process_delay: Duration::from_millis(delay_ms),
        task_timeout: Duration::from_millis(timeout_ms),
        failure_policy,
    }
}

pub fn pool(num_workers: usize) -> Arc<WorkerPool> {
    Arc::new(WorkerPool::new(num_workers, 64, Duration::from_secs(1)))
}

pub fn coordinator<S: item_catalog_db::repository::ItemStore + 'static>(
    store: Arc<S>,
    pool: Arc<WorkerPool>,
    settings: BatchSettings,
) -> BatchCoordinator<S> {
    BatchCoordinator::new(store, pool, settings)
}

/// Number of items between load and save, shareable across stores.
#[derive(Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// In-memory store with injectable faults and an in-flight gauge.
///
/// An item is in flight from its load until its save.
#[derive(Default)]
pub struct ScriptedStore {
    inner: InMemoryItemStore,
    /// Listed by the snapshot but gone by the time they are loaded
    vanished: HashSet<ItemId>,
    failing_saves: HashSet<ItemId>,
    hanging_loads: HashSet<ItemId>,
    panicking_loads: HashSet<ItemId>,
    failing_list: bool,
    in_flight: Arc<InFlight>,
}

impl ScriptedStore {
    pub fn with_items(items: impl IntoIterator<Item = ItemModel>) -> Self {
        Self {
            inner: InMemoryItemStore::with_items(items),
            ..Self::default()
        }
    }

    pub fn vanish(mut self, id: ItemId) -> Self {
        self.vanished.insert(id);
        self
    }

    pub fn fail_save(mut self, id: ItemId) -> Self {
        self.failing_saves.insert(id);
        self
    }

    pub fn hang_load(mut self, id: ItemId) -> Self {
        self.hanging_loads.insert(id);
        self
    }

    pub fn panic_on_load(mut self, id: ItemId) -> Self {
        self.panicking_loads.insert(id);
        self
    }

    pub fn fail_list(mut self) -> Self {
        self.failing_list = true;
        self
    }

    /// Counts this store's items on `gauge` instead of a private one
    pub fn share_gauge(mut self, gauge: Arc<InFlight>) -> Self {
        self.in_flight = gauge;
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.in_flight.peak()
    }

    pub async fn stored(&self, id: ItemId) -> Option<ItemModel> {
        self.inner.load(id).await.unwrap()
    }
}

#[async_trait]
impl ListIds for ScriptedStore {
    async fn list_ids(&self) -> StoreResult<Vec<ItemId>> {
        if self.failing_list {
            return Err("connection refused".into());
        }
        let mut ids = self.inner.list_ids().await?;
        ids.extend(self.vanished.iter().copied());
        ids.sort_unstable();
        Ok(ids)
    }
}

#[async_trait]
impl Load<ItemModel> for ScriptedStore {
    async fn load(&self, id: ItemId) -> StoreResult<Option<ItemModel>> {
        if self.panicking_loads.contains(&id) {
            panic!("corrupt row {id}");
        }
        if self.hanging_loads.contains(&id) {
            std::future::pending::<()>().await;
        }
        if self.vanished.contains(&id) {
            return Ok(None);
        }

        self.in_flight.enter();
        self.inner.load(id).await
    }
}

#[async_trait]
impl LoadAll<ItemModel> for ScriptedStore {
    async fn load_all(&self) -> StoreResult<Vec<ItemModel>> {
        self.inner.load_all().await
    }
}

#[async_trait]
impl Save<ItemModel> for ScriptedStore {
    async fn save(&self, item: ItemModel) -> StoreResult<ItemModel> {
        self.in_flight.leave();
        if item.id.is_some_and(|id| self.failing_saves.contains(&id)) {
            return Err("disk full".into());
        }
        self.inner.save(item).await
    }
}

#[async_trait]
impl Delete for ScriptedStore {
    async fn delete(&self, id: ItemId) -> StoreResult<bool> {
        self.inner.delete(id).await
    }
}
