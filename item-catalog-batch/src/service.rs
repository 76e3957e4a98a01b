use async_trait::async_trait;
use item_catalog_api::{ItemError, ItemId, ItemRequest, ItemResult};
use item_catalog_db::models::item::ItemModel;
use item_catalog_db::repository::ItemStore;
use std::sync::Arc;
use validator::Validate;

use crate::batch::BatchCoordinator;

/// Catalog operations offered to a transport layer.
#[async_trait]
pub trait ItemService: Send + Sync {
    async fn find_all(&self) -> ItemResult<Vec<ItemModel>>;

    async fn find_by_id(&self, id: ItemId) -> ItemResult<ItemModel>;

    /// Validates and stores a new item; the store assigns its id.
    async fn create(&self, request: ItemRequest) -> ItemResult<ItemModel>;

    /// Replaces name, description and email of an existing item.
    async fn update(&self, id: ItemId, request: ItemRequest) -> ItemResult<ItemModel>;

    async fn delete(&self, id: ItemId) -> ItemResult<()>;

    /// Marks every item as processed, see [`BatchCoordinator::process_all`].
    async fn process_all(&self) -> ItemResult<Vec<ItemModel>>;
}

pub struct CatalogService<S: ItemStore + 'static> {
    store: Arc<S>,
    coordinator: BatchCoordinator<S>,
}

impl<S: ItemStore + 'static> CatalogService<S> {
    pub fn new(store: Arc<S>, coordinator: BatchCoordinator<S>) -> Self {
        Self { store, coordinator }
    }

    pub fn coordinator(&self) -> &BatchCoordinator<S> {
        &self.coordinator
    }
}

#[async_trait]
impl<S: ItemStore + 'static> ItemService for CatalogService<S> {
    async fn find_all(&self) -> ItemResult<Vec<ItemModel>> {
        self.store.load_all().await.map_err(ItemError::store)
    }

    async fn find_by_id(&self, id: ItemId) -> ItemResult<ItemModel> {
        self.store
            .load(id)
            .await
            .map_err(ItemError::store)?
            .ok_or(ItemError::NotFound(id))
    }

    async fn create(&self, request: ItemRequest) -> ItemResult<ItemModel> {
        request.validate()?;
        let item = ItemModel::try_from(&request)?;

        let saved = self.store.save(item).await.map_err(ItemError::store)?;
        tracing::debug!(id = ?saved.id, "item created");
        Ok(saved)
    }

    async fn update(&self, id: ItemId, request: ItemRequest) -> ItemResult<ItemModel> {
        request.validate()?;
        let mut existing = self.find_by_id(id).await?;
        existing.apply(&request)?;

        self.store.save(existing).await.map_err(ItemError::store)
    }

    async fn delete(&self, id: ItemId) -> ItemResult<()> {
        if self.store.delete(id).await.map_err(ItemError::store)? {
            Ok(())
        } else {
            Err(ItemError::NotFound(id))
        }
    }

    async fn process_all(&self) -> ItemResult<Vec<ItemModel>> {
        Ok(self.coordinator.process_all().await?)
    }
}
