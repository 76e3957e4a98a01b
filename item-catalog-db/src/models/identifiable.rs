use item_catalog_api::ItemId;

/// Trait for entities that are identified by a store-assigned id
pub trait Identifiable {
    /// Returns the identifier of the entity, or `None` before its first save
    fn get_id(&self) -> Option<ItemId>;
}
