use async_trait::async_trait;
use item_catalog_api::ItemId;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading an entity by its ID
///
/// This trait provides a standard interface for loading entities from a data store.
/// Any entity that implements the Identifiable trait can be loaded using this trait.
/// A missing entity is not an error and is reported as `None`.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl Load<ItemModel> for ItemRepositoryImpl {
///     async fn load(&self, id: ItemId) -> Result<Option<ItemModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait Load<T: Identifiable>: Send + Sync {
    /// Load an entity by its unique identifier
    ///
    /// # Arguments
    /// * `id` - The identifier of the entity to load
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The loaded entity
    /// * `Ok(None)` - If the entity does not exist
    /// * `Err` - An error if the query could not be executed
    async fn load(&self, id: ItemId) -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>;
}
