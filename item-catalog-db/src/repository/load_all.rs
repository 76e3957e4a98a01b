use async_trait::async_trait;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading every entity of a store
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait LoadAll<T: Identifiable>: Send + Sync {
    /// Load all entities, ordered by ascending identifier
    async fn load_all(&self) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
