use item_catalog_api::ItemId;
use item_catalog_db::models::item::ItemModel;
use item_catalog_db::repository::ItemStore;
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

use super::coordinator::BatchSettings;
use super::outcome::ItemOutcome;
use crate::error::ItemFailure;

/// Loads, transforms and persists a single item.
///
/// Never fails: every error, the deadline and cancellation end in an
/// [`ItemOutcome::Failed`].
pub(crate) async fn process_item<S: ItemStore + ?Sized>(
    store: Arc<S>,
    id: ItemId,
    settings: BatchSettings,
    cancel: CancellationToken,
) -> ItemOutcome {
    let deadline = settings.task_timeout;

    match timeout(deadline, run(&*store, id, &settings, &cancel)).await {
        Ok(Ok(item)) => {
            tracing::debug!(id, "item processed");
            ItemOutcome::Processed(item)
        }
        Ok(Err(failure)) => {
            tracing::debug!(id, %failure, "item failed");
            ItemOutcome::Failed(failure)
        }
        Err(_) => {
            tracing::debug!(id, ?deadline, "item timed out");
            ItemOutcome::Failed(ItemFailure::Timeout { id, after: deadline })
        }
    }
}

async fn run<S: ItemStore + ?Sized>(
    store: &S,
    id: ItemId,
    settings: &BatchSettings,
    cancel: &CancellationToken,
) -> Result<ItemModel, ItemFailure> {
    if cancel.is_cancelled() {
        return Err(ItemFailure::Cancelled(id));
    }

    let mut item = store
        .load(id)
        .await
        .map_err(|e| ItemFailure::Persistence {
            id,
            cause: e.to_string(),
        })?
        .ok_or(ItemFailure::NotFound(id))?;

    tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ItemFailure::Cancelled(id)),
        _ = sleep(settings.process_delay) => {}
    }

    item.mark_processed();

    store.save(item).await.map_err(|e| ItemFailure::Persistence {
        id,
        cause: e.to_string(),
    })
}
