//! Batch processing for the item catalog.
//!
//! [`BatchCoordinator`] snapshots the store's ids, runs one load, transform
//! and persist task per id on a shared [`WorkerPool`], and folds the outcomes
//! into a single result according to the configured [`FailurePolicy`].

pub mod batch;
pub mod config;
pub mod error;
pub mod pool;
pub mod service;
pub mod telemetry;

pub use batch::{BatchCoordinator, BatchReport, BatchSettings, ItemOutcome};
pub use config::{AppConfig, BatchConfig, CliArgs, FailurePolicy};
pub use error::{BatchError, ItemFailure, PoolError};
pub use pool::WorkerPool;
pub use service::{CatalogService, ItemService};
