use async_trait::async_trait;
use item_catalog_api::ItemId;
use item_catalog_db::models::item::ItemModel;
use item_catalog_db::repository::load::Load;
use crate::utils::TryFromRow;
use std::error::Error;

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &ItemRepositoryImpl,
        id: ItemId,
    ) -> Result<Option<ItemModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(r#"SELECT * FROM item WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&*repo.pool)
            .await?;

        row.map(|row| ItemModel::try_from_row(&row)).transpose()
    }
}

#[async_trait]
impl Load<ItemModel> for ItemRepositoryImpl {
    async fn load(&self, id: ItemId) -> Result<Option<ItemModel>, Box<dyn Error + Send + Sync>> {
        Self::load_impl(self, id).await
    }
}
