//! Process-wide pool of asynchronous workers.
//!
//! [`WorkerPool`] owns a fixed number of worker tasks that pull jobs from one
//! bounded queue, so at most `num_workers` jobs execute at any time no matter
//! how many batches submit concurrently. It is created once at process start,
//! shared by `Arc`, and stopped with [`WorkerPool::shutdown`].
//!
//! The pool's [`CancellationToken`] is the parent of every batch token handed
//! out by [`WorkerPool::child_token`]; shutting the pool down cancels them all.

use super::worker::{worker_loop, WorkQueue, WorkRequest};
use crate::config::BatchConfig;
use crate::error::PoolError;
use core::future::Future;
use core::time::Duration;
use futures::FutureExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

pub struct WorkerPool {
    sender: mpsc::Sender<WorkRequest>,
    num_workers: usize,
    accepting: AtomicBool,
    shutdown_token: CancellationToken,
    shutdown_timeout: Duration,
}

impl WorkerPool {
    /// Spawns `num_workers` worker tasks on the current Tokio runtime.
    ///
    /// At least one worker is always spawned. `queue_capacity` bounds the
    /// number of queued jobs; submitters wait for space once it is reached.
    pub fn new(num_workers: usize, queue_capacity: usize, shutdown_timeout: Duration) -> Self {
        let num_workers = num_workers.max(1);
        let (sender, receiver) = mpsc::channel(queue_capacity.max(1));
        let queue: WorkQueue = Arc::new(Mutex::new(receiver));

        for worker_id in 0..num_workers {
            tokio::spawn(worker_loop(worker_id, queue.clone()));
        }

        tracing::debug!(num_workers, queue_capacity, "Worker pool started");

        Self {
            sender,
            num_workers,
            accepting: AtomicBool::new(true),
            shutdown_token: CancellationToken::new(),
            shutdown_timeout,
        }
    }

    pub fn from_config(config: &BatchConfig) -> Self {
        Self::new(
            config.num_workers,
            config.queue_capacity,
            config.shutdown_timeout,
        )
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting.load(Ordering::Acquire) && !self.shutdown_token.is_cancelled()
    }

    /// A token cancelled when the pool shuts down.
    pub fn child_token(&self) -> CancellationToken {
        self.shutdown_token.child_token()
    }

    /// Queues `future` for execution on the next free worker.
    ///
    /// The returned receiver resolves with the future's output. It resolves
    /// with an error if the job is dropped without completing (pool shutdown
    /// or panic).
    ///
    /// # Errors
    ///
    /// - [`PoolError::ShuttingDown`] once [`shutdown`](Self::shutdown) began.
    /// - [`PoolError::ChannelClosed`] if every worker has exited.
    pub async fn submit<F, T>(&self, future: F) -> Result<oneshot::Receiver<T>, PoolError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if !self.is_accepting() {
            return Err(PoolError::ShuttingDown);
        }

        let (tx, rx) = oneshot::channel();
        let job = async move {
            // The submitter may have stopped waiting
            let _ = tx.send(future.await);
        }
        .boxed();

        self.sender
            .send(WorkRequest::Run { job })
            .await
            .map_err(|_| PoolError::ChannelClosed {
                context: "work queue closed".to_string(),
            })?;

        Ok(rx)
    }

    /// Gracefully shuts down all workers in the pool.
    ///
    /// - Refuses new submissions.
    /// - Cancels the shared token so running and queued jobs exit early.
    /// - Sends a [`WorkRequest::Shutdown`] to each worker behind the queued jobs.
    /// - Waits up to `shutdown_timeout` per worker for acknowledgements.
    ///
    /// Calling it again is a no-op.
    pub async fn shutdown(&self) -> Result<(), PoolError> {
        if !self.accepting.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        // === Phase 1: Cancel running and queued work ===
        tracing::info!("Worker pool shutting down");
        self.shutdown_token.cancel();

        // === Phase 2: Notify workers to shut down ===
        let mut shutdown_handles = Vec::with_capacity(self.num_workers);
        for i in 0..self.num_workers {
            let (tx, rx) = oneshot::channel();
            if let Err(e) = self.sender.send(WorkRequest::Shutdown { response: tx }).await {
                tracing::error!("Failed to send shutdown to worker {i}: {e}");
                return Err(PoolError::ChannelClosed {
                    context: format!("shutdown of worker {i}"),
                });
            }
            shutdown_handles.push((i, rx));
        }

        // === Phase 3: Wait for acknowledgements ===
        let wait = self.shutdown_timeout;
        let acks = shutdown_handles.into_iter().map(|(i, rx)| async move {
            match timeout(wait, rx).await {
                Ok(Ok(())) => tracing::trace!("Worker {i} shutdown acknowledged"),
                Ok(Err(e)) => tracing::error!("Worker {i} returned error: {e}"),
                Err(_) => tracing::warn!("Worker {i} shutdown timed out"),
            }
        });
        futures::future::join_all(acks).await;

        tracing::info!("Worker pool shutdown complete");
        Ok(())
    }

    /// Stops every worker while still accepting submissions, leaving the
    /// queue without a receiver.
    #[cfg(test)]
    pub(crate) async fn stop_workers(&self) {
        for _ in 0..self.num_workers {
            let (tx, rx) = oneshot::channel();
            if self.sender.send(WorkRequest::Shutdown { response: tx }).await.is_ok() {
                let _ = rx.await;
            }
        }
        while !self.sender.is_closed() {
            tokio::task::yield_now().await;
        }
    }
}
