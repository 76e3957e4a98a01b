use chrono::{DateTime, Utc};
use item_catalog_db::models::item::ItemModel;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ItemFailure;

/// Terminal result of one item task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum ItemOutcome {
    Processed(ItemModel),
    Failed(ItemFailure),
}

impl ItemOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, ItemOutcome::Processed(_))
    }
}

/// Every outcome of one batch, in snapshot order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn processed(&self) -> impl Iterator<Item = &ItemModel> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            ItemOutcome::Processed(item) => Some(item),
            ItemOutcome::Failed(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemFailure> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            ItemOutcome::Failed(failure) => Some(failure),
            ItemOutcome::Processed(_) => None,
        })
    }

    /// True when no task failed
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(ItemOutcome::is_processed)
    }

    /// Splits the outcomes into processed items and failures, both in snapshot order
    pub fn into_parts(self) -> (Vec<ItemModel>, Vec<ItemFailure>) {
        let mut processed = Vec::with_capacity(self.outcomes.len());
        let mut failures = Vec::new();
        for outcome in self.outcomes {
            match outcome {
                ItemOutcome::Processed(item) => processed.push(item),
                ItemOutcome::Failed(failure) => failures.push(failure),
            }
        }
        (processed, failures)
    }
}
