use async_trait::async_trait;
use item_catalog_api::ItemId;

/// Repository trait for taking a snapshot of every known identifier
///
/// The returned list is a point-in-time view: identifiers created after the
/// call returns are not part of it.
///
/// # Example
/// ```ignore
/// impl ListIds for ItemRepositoryImpl {
///     async fn list_ids(&self) -> Result<Vec<ItemId>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait ListIds: Send + Sync {
    /// List all identifiers currently present in the store
    ///
    /// # Returns
    /// * `Ok(Vec<ItemId>)` - All identifiers in ascending order
    /// * `Err` - An error if the query could not be executed
    async fn list_ids(&self) -> Result<Vec<ItemId>, Box<dyn std::error::Error + Send + Sync>>;
}
