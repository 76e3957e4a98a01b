use async_trait::async_trait;
use item_catalog_api::ItemId;

/// Repository trait for deleting an entity by its ID
#[async_trait]
pub trait Delete: Send + Sync {
    /// Delete the entity with the given identifier
    ///
    /// # Returns
    /// * `Ok(true)` - The entity existed and was removed
    /// * `Ok(false)` - No entity had this identifier
    /// * `Err` - An error if the statement could not be executed
    async fn delete(&self, id: ItemId) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
