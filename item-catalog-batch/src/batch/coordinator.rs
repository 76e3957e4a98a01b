use chrono::Utc;
use core::time::Duration;
use futures::future::join_all;
use item_catalog_db::models::item::ItemModel;
use item_catalog_db::repository::ItemStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::outcome::{BatchReport, ItemOutcome};
use super::task::process_item;
use crate::config::{BatchConfig, FailurePolicy};
use crate::error::{BatchError, ItemFailure, PoolError};
use crate::pool::WorkerPool;

/// Per-task parameters shared by every item of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    pub process_delay: Duration,
    pub task_timeout: Duration,
    pub failure_policy: FailurePolicy,
}

impl From<&BatchConfig> for BatchSettings {
    fn from(config: &BatchConfig) -> Self {
        Self {
            process_delay: config.process_delay,
            task_timeout: config.task_timeout,
            failure_policy: config.failure_policy,
        }
    }
}

/// Runs the batch operation: every item currently in the store is moved to
/// `PROCESSED`.
///
/// A call snapshots the ids, submits one task per id to the shared
/// [`WorkerPool`] and waits until every task reached a terminal state. A
/// failing task never cancels its siblings. Results come back in snapshot
/// order (ascending id for the bundled stores).
///
/// Coordinators are cheap to clone; concurrent calls share nothing but the
/// pool and the store.
pub struct BatchCoordinator<S: ItemStore + 'static> {
    store: Arc<S>,
    pool: Arc<WorkerPool>,
    settings: BatchSettings,
}

impl<S: ItemStore + 'static> Clone for BatchCoordinator<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            pool: self.pool.clone(),
            settings: self.settings,
        }
    }
}

impl<S: ItemStore + 'static> BatchCoordinator<S> {
    pub fn new(store: Arc<S>, pool: Arc<WorkerPool>, settings: BatchSettings) -> Self {
        Self {
            store,
            pool,
            settings,
        }
    }

    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Processes every item and applies the configured [`FailurePolicy`].
    ///
    /// # Errors
    ///
    /// - [`BatchError::Snapshot`] if the ids could not be listed.
    /// - [`BatchError::Rejected`] if any item failed under
    ///   [`FailurePolicy::RejectBatch`].
    /// - [`BatchError::Pool`] if the pool is shut down or has no live workers.
    pub async fn process_all(&self) -> Result<Vec<ItemModel>, BatchError> {
        self.process_all_with(&CancellationToken::new()).await
    }

    /// Like [`process_all`](Self::process_all); cancelling `cancel` stops
    /// tasks still waiting on the transform, which fail as
    /// [`ItemFailure::Cancelled`].
    pub async fn process_all_with(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<ItemModel>, BatchError> {
        let report = self.run_batch(cancel).await?;
        apply_policy(self.settings.failure_policy, report)
    }

    /// Runs one batch and returns every outcome without applying the policy.
    #[tracing::instrument(skip_all, fields(batch_id = tracing::field::Empty))]
    pub async fn run_batch(&self, cancel: &CancellationToken) -> Result<BatchReport, BatchError> {
        if !self.pool.is_accepting() {
            return Err(PoolError::ShuttingDown.into());
        }

        let batch_id = Uuid::new_v4();
        tracing::Span::current().record("batch_id", tracing::field::display(batch_id));
        let started_at = Utc::now();

        let ids = self
            .store
            .list_ids()
            .await
            .map_err(|e| BatchError::Snapshot(e.to_string()))?;
        tracing::info!(items = ids.len(), "Starting batch");

        // Cancelled by pool shutdown, by the caller, or when this call returns
        let batch_token = self.pool.child_token();
        let _batch_guard = batch_token.clone().drop_guard();
        tokio::spawn({
            let caller = cancel.clone();
            let batch = batch_token.clone();
            async move {
                tokio::select! {
                    _ = caller.cancelled() => batch.cancel(),
                    _ = batch.cancelled() => {}
                }
            }
        });

        let mut pending = Vec::with_capacity(ids.len());
        for &id in &ids {
            let job = process_item(self.store.clone(), id, self.settings, batch_token.clone());
            match self.pool.submit(job).await {
                Ok(rx) => pending.push((id, Some(rx))),
                Err(PoolError::ShuttingDown) => {
                    tracing::warn!(id, "Item not submitted, pool shutting down");
                    batch_token.cancel();
                    pending.push((id, None));
                }
                Err(e) => {
                    tracing::error!(id, error = %e, "Worker pool unavailable");
                    return Err(e.into());
                }
            }
        }

        let outcomes = join_all(pending.into_iter().map(|(id, rx)| {
            let batch_token = batch_token.clone();
            async move {
                let received = match rx {
                    Some(rx) => rx.await.ok(),
                    None => None,
                };
                received.unwrap_or_else(|| {
                    // Dropped unfinished, or never queued because of shutdown
                    if batch_token.is_cancelled() {
                        ItemOutcome::Failed(ItemFailure::Cancelled(id))
                    } else {
                        ItemOutcome::Failed(ItemFailure::Aborted(id))
                    }
                })
            }
        }))
        .await;

        let report = BatchReport {
            batch_id,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };

        let failed = report.failures().count();
        tracing::info!(
            processed = report.outcomes.len() - failed,
            failed,
            elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
            "Batch finished"
        );

        Ok(report)
    }
}

/// Folds a report into the caller-facing result.
pub fn apply_policy(
    policy: FailurePolicy,
    report: BatchReport,
) -> Result<Vec<ItemModel>, BatchError> {
    let batch_id = report.batch_id;
    let (processed, failures) = report.into_parts();

    if failures.is_empty() {
        return Ok(processed);
    }

    match policy {
        FailurePolicy::RejectBatch => {
            tracing::warn!(%batch_id, failed = failures.len(), "Batch rejected");
            Err(BatchError::Rejected {
                batch_id,
                failures,
                processed: processed.len(),
            })
        }
        FailurePolicy::DropFailures => {
            for failure in &failures {
                tracing::warn!(%batch_id, id = failure.item_id(), %failure, "Dropping failed item");
            }
            Ok(processed)
        }
    }
}
