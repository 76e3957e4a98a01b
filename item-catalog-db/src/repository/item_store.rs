use crate::models::item::ItemModel;

use super::{Delete, ListIds, Load, LoadAll, Save};

/// Every store operation the catalog needs for [`ItemModel`]
///
/// Implemented automatically for any type providing the individual traits.
pub trait ItemStore:
    ListIds + Load<ItemModel> + LoadAll<ItemModel> + Save<ItemModel> + Delete
{
}

impl<S> ItemStore for S where
    S: ListIds + Load<ItemModel> + LoadAll<ItemModel> + Save<ItemModel> + Delete
{
}
