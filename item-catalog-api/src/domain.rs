use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store-assigned item identifier
pub type ItemId = i64;

/// Status written by the batch operation
pub const PROCESSED_STATUS: &str = "PROCESSED";

/// Maximum length of every item text column
pub const MAX_TEXT_LEN: usize = 255;

/// Client-supplied item fields for create and update.
///
/// The identifier is never part of the request: the store assigns it on
/// first save and update addresses the item by path id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ItemRequest {
    #[validate(custom(function = "not_blank", message = "Name must be not blank"))]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "Description must be not blank"))]
    pub description: String,

    #[serde(default)]
    pub status: Option<String>,

    #[validate(
        custom(function = "not_blank", message = "Email must be not blank"),
        email(message = "Introduce a valid email please")
    )]
    pub email: String,
}

impl ItemRequest {
    pub fn new(name: &str, description: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: None,
            email: email.to_string(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
