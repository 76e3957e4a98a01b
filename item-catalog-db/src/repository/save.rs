use async_trait::async_trait;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for inserting or updating an entity
///
/// Entities without an identifier are inserted and receive a store-assigned
/// id. Entities with an identifier are upserted under that id.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl Save<ItemModel> for ItemRepositoryImpl {
///     async fn save(&self, item: ItemModel) -> Result<ItemModel, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait Save<T: Identifiable>: Send + Sync {
    /// Persist an entity
    ///
    /// # Arguments
    /// * `item` - The entity to persist
    ///
    /// # Returns
    /// * `Ok(T)` - The persisted entity with its identifier populated
    /// * `Err` - An error if the statement could not be executed
    async fn save(&self, item: T) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
