use async_trait::async_trait;
use item_catalog_db::models::item::ItemModel;
use item_catalog_db::repository::load_all::LoadAll;
use crate::utils::TryFromRow;
use std::error::Error;

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    pub(super) async fn load_all_impl(
        repo: &ItemRepositoryImpl,
    ) -> Result<Vec<ItemModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(r#"SELECT * FROM item ORDER BY id"#)
            .fetch_all(&*repo.pool)
            .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ItemModel::try_from_row(&row)?);
        }
        Ok(items)
    }
}

#[async_trait]
impl LoadAll<ItemModel> for ItemRepositoryImpl {
    async fn load_all(&self) -> Result<Vec<ItemModel>, Box<dyn Error + Send + Sync>> {
        Self::load_all_impl(self).await
    }
}
