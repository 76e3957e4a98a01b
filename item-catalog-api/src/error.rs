use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::ItemId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Item with id {0} not found")]
    NotFound(ItemId),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Batch rejected: {} item(s) failed {failed_ids:?}", failed_ids.len())]
    BatchRejected { failed_ids: Vec<ItemId> },
}

impl ItemError {
    /// Wraps a boxed store error by its message
    pub fn store(err: impl std::fmt::Display) -> Self {
        ItemError::Store(err.to_string())
    }
}

impl From<ValidationErrors> for ItemError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: {}", err.code),
                })
            })
            .collect();
        messages.sort();
        ItemError::Validation(messages.join(", "))
    }
}

pub type ItemResult<T> = Result<T, ItemError>;
