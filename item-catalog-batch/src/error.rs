//! Error types for batch processing.
//!
//! ## Error Cases
//! - [`ItemFailure`]: the terminal failure of one item's task. Always
//!   captured as an outcome, never propagated out of the task.
//! - [`BatchError`]: the failure of a whole `process_all` call.
//! - [`PoolError`]: the worker pool refused a submission.

use core::time::Duration;
use item_catalog_api::{ItemError, ItemId};
use serde::Serialize;
use uuid::Uuid;

/// Structured failure of a single item task.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ItemFailure {
    /// The id was in the snapshot but no longer resolves to a record.
    #[error("Item with id {0} not found")]
    NotFound(ItemId),

    /// The store failed to load or persist the item.
    #[error("Persistence failure for item {id}: {cause}")]
    Persistence { id: ItemId, cause: String },

    /// The task exceeded its deadline.
    #[error("Processing item {id} timed out after {after:?}")]
    Timeout { id: ItemId, after: Duration },

    /// The batch or the pool was cancelled before the task finished.
    #[error("Processing item {0} was cancelled")]
    Cancelled(ItemId),

    /// The task ended without reporting an outcome (it panicked).
    #[error("Processing item {0} aborted")]
    Aborted(ItemId),
}

impl ItemFailure {
    pub fn item_id(&self) -> ItemId {
        match self {
            ItemFailure::NotFound(id)
            | ItemFailure::Cancelled(id)
            | ItemFailure::Aborted(id)
            | ItemFailure::Persistence { id, .. }
            | ItemFailure::Timeout { id, .. } => *id,
        }
    }
}

/// Errors raised by the worker pool.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The pool no longer accepts work.
    #[error("Worker pool is shutting down")]
    ShuttingDown,

    /// Internal channel failure between the pool and its workers.
    #[error("Worker channel closed: {context}")]
    ChannelClosed { context: String },
}

/// Failure of a whole batch call.
#[derive(Clone, thiserror::Error, Debug)]
pub enum BatchError {
    /// The id snapshot could not be taken; no task was started.
    #[error("Failed to list item ids: {0}")]
    Snapshot(String),

    /// At least one item failed and the batch was rejected.
    #[error("Batch {batch_id} rejected: {} item(s) failed, {processed} processed", failures.len())]
    Rejected {
        batch_id: Uuid,
        failures: Vec<ItemFailure>,
        processed: usize,
    },

    /// The worker pool refused the batch.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl BatchError {
    /// Ids of the items that failed, for selective retry
    pub fn failed_ids(&self) -> Vec<ItemId> {
        match self {
            BatchError::Rejected { failures, .. } => {
                failures.iter().map(ItemFailure::item_id).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl From<BatchError> for ItemError {
    fn from(err: BatchError) -> Self {
        let failed_ids = err.failed_ids();
        match err {
            BatchError::Rejected { .. } => ItemError::BatchRejected { failed_ids },
            BatchError::Snapshot(cause) => ItemError::Store(cause),
            BatchError::Pool(e) => ItemError::Unavailable(e.to_string()),
        }
    }
}
