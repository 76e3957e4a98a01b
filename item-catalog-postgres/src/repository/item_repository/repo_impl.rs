use item_catalog_db::models::item::ItemModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

/// Postgres-backed item store.
///
/// Each call checks out its own connection from the pool, so concurrent batch
/// tasks never serialize on a shared transaction.
pub struct ItemRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ItemRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ItemModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ItemModel {
            id: Some(row.try_get("id")?),
            name: get_heapless_string(row, "name")?,
            description: get_heapless_string(row, "description")?,
            status: get_optional_heapless_string(row, "status")?,
            email: get_heapless_string(row, "email")?,
        })
    }
}
