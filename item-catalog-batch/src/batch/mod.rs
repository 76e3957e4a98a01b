//! The batch operation.
//!
//! - [`coordinator`] - snapshot, fan-out to the pool, join, failure policy.
//! - [`task`] - one item's load, transform and persist.
//! - [`outcome`] - per-item outcomes and the batch report.

pub mod coordinator;
pub mod outcome;
pub(crate) mod task;

pub use coordinator::{apply_policy, BatchCoordinator, BatchSettings};
pub use outcome::{BatchReport, ItemOutcome};
