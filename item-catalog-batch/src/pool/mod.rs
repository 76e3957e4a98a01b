//! Bounded worker pool shared by every batch.
//!
//! - [`manager`] - the [`WorkerPool`] handle: submission, cancellation, shutdown.
//! - [`worker`] - the worker loop and its queue messages.

pub mod manager;
pub mod worker;

pub use manager::WorkerPool;
