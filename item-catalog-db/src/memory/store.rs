use async_trait::async_trait;
use item_catalog_api::ItemId;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::error::Error;

use crate::models::item::ItemModel;
use crate::repository::{Delete, ListIds, Load, LoadAll, Save};

/// `BTreeMap`-backed item store.
///
/// Ids are handed out from a monotonically increasing sequence starting at 1.
/// Saving an item with an explicit id upserts it and moves the sequence past
/// that id. Locks are never held across an await point.
#[derive(Debug)]
pub struct InMemoryItemStore {
    state: RwLock<State>,
}

#[derive(Debug)]
struct State {
    items: BTreeMap<ItemId, ItemModel>,
    next_id: ItemId,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                items: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store pre-populated with `items`; unsaved items get fresh ids.
    ///
    /// Unsaved items that arrive once the id sequence is exhausted are skipped.
    pub fn with_items(items: impl IntoIterator<Item = ItemModel>) -> Self {
        let store = Self::new();
        for item in items {
            let _ = store.upsert(item);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    fn upsert(&self, mut item: ItemModel) -> Result<ItemModel, Box<dyn Error + Send + Sync>> {
        let mut state = self.state.write();
        let id = match item.id {
            Some(id) => id,
            None if state.items.contains_key(&state.next_id) => {
                return Err("item id sequence exhausted".into());
            }
            None => state.next_id,
        };
        // Saturates at ItemId::MAX; that id is then only reusable by explicit upserts
        state.next_id = state.next_id.max(id.saturating_add(1));
        item.id = Some(id);
        state.items.insert(id, item.clone());
        Ok(item)
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListIds for InMemoryItemStore {
    async fn list_ids(&self) -> Result<Vec<ItemId>, Box<dyn Error + Send + Sync>> {
        Ok(self.state.read().items.keys().copied().collect())
    }
}

#[async_trait]
impl Load<ItemModel> for InMemoryItemStore {
    async fn load(&self, id: ItemId) -> Result<Option<ItemModel>, Box<dyn Error + Send + Sync>> {
        Ok(self.state.read().items.get(&id).cloned())
    }
}

#[async_trait]
impl LoadAll<ItemModel> for InMemoryItemStore {
    async fn load_all(&self) -> Result<Vec<ItemModel>, Box<dyn Error + Send + Sync>> {
        Ok(self.state.read().items.values().cloned().collect())
    }
}

#[async_trait]
impl Save<ItemModel> for InMemoryItemStore {
    async fn save(&self, item: ItemModel) -> Result<ItemModel, Box<dyn Error + Send + Sync>> {
        self.upsert(item)
    }
}

#[async_trait]
impl Delete for InMemoryItemStore {
    async fn delete(&self, id: ItemId) -> Result<bool, Box<dyn Error + Send + Sync>> {
        Ok(self.state.write().items.remove(&id).is_some())
    }
}
