use futures::future::BoxFuture;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex};

/// A unit of work submitted to the pool. The job reports its own result.
pub type Job = BoxFuture<'static, ()>;

/// Messages consumed by worker loops.
pub enum WorkRequest {
    /// Run a job to completion.
    Run { job: Job },
    /// Stop the receiving worker and acknowledge.
    Shutdown { response: oneshot::Sender<()> },
}

/// Shared queue all workers pull from.
pub type WorkQueue = Arc<Mutex<mpsc::Receiver<WorkRequest>>>;

/// Worker task executing [`WorkRequest`]s one at a time.
///
/// All workers share one queue, so a job waits only until any worker is
/// free. The queue lock is released before the job runs. A panicking job is
/// logged and the worker keeps serving; the job's result channel is dropped,
/// which its submitter observes as a lost outcome.
///
/// Exits on [`WorkRequest::Shutdown`] or when the queue closes.
pub async fn worker_loop(worker_id: usize, queue: WorkQueue) {
    tracing::trace!("Worker {worker_id} started");

    loop {
        let request = { queue.lock().await.recv().await };

        match request {
            Some(WorkRequest::Run { job }) => {
                if AssertUnwindSafe(job).catch_unwind().await.is_err() {
                    tracing::error!("Worker {worker_id} job panicked");
                }
            }
            Some(WorkRequest::Shutdown { response }) => {
                tracing::debug!("Worker {worker_id} received shutdown signal");

                if response.send(()).is_err() {
                    tracing::error!("Worker {worker_id} failed to acknowledge shutdown");
                }
                break;
            }
            None => break,
        }
    }

    tracing::trace!("Worker {worker_id} stopped");
}
