use heapless::String as HeaplessString;
use item_catalog_api::{ItemError, ItemId, ItemRequest, MAX_TEXT_LEN, PROCESSED_STATUS};
use serde::{Deserialize, Serialize};

use crate::models::Identifiable;

/// Bounded text column of the item table
pub type ItemText = HeaplessString<MAX_TEXT_LEN>;

const _: () = assert!(PROCESSED_STATUS.len() <= MAX_TEXT_LEN);

/// # Documentation
/// - Catalog item; `status` is free form and only the batch operation writes `PROCESSED`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemModel {
    pub id: Option<ItemId>,

    pub name: ItemText,
    pub description: ItemText,
    pub status: Option<ItemText>,
    pub email: ItemText,
}

impl ItemModel {
    /// Builds an unsaved item
    pub fn new(name: &str, description: &str, email: &str) -> Result<Self, ItemError> {
        Ok(Self {
            id: None,
            name: to_text("name", name)?,
            description: to_text("description", description)?,
            status: None,
            email: to_text("email", email)?,
        })
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_processed(&self) -> bool {
        self.status.as_ref().map(|s| s.as_str()) == Some(PROCESSED_STATUS)
    }

    /// Sets `status` to `PROCESSED`, leaving every other field untouched
    pub fn mark_processed(&mut self) {
        self.status = ItemText::try_from(PROCESSED_STATUS).ok();
    }

    /// Copies the client-editable fields of `request` onto this item.
    ///
    /// `id` and `status` are kept.
    pub fn apply(&mut self, request: &ItemRequest) -> Result<(), ItemError> {
        self.name = to_text("name", &request.name)?;
        self.description = to_text("description", &request.description)?;
        self.email = to_text("email", &request.email)?;
        Ok(())
    }
}

impl Identifiable for ItemModel {
    fn get_id(&self) -> Option<ItemId> {
        self.id
    }
}

impl TryFrom<&ItemRequest> for ItemModel {
    type Error = ItemError;

    fn try_from(request: &ItemRequest) -> Result<Self, Self::Error> {
        let mut item = ItemModel::new(&request.name, &request.description, &request.email)?;
        item.status = request
            .status
            .as_deref()
            .map(|status| to_text("status", status))
            .transpose()?;
        Ok(item)
    }
}

fn to_text(field: &str, value: &str) -> Result<ItemText, ItemError> {
    ItemText::try_from(value).map_err(|_| {
        ItemError::Validation(format!("{field}: must be at most {MAX_TEXT_LEN} bytes"))
    })
}
