use async_trait::async_trait;
use item_catalog_api::ItemId;
use item_catalog_db::repository::list_ids::ListIds;
use std::error::Error;

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    pub(super) async fn list_ids_impl(
        repo: &ItemRepositoryImpl,
    ) -> Result<Vec<ItemId>, Box<dyn Error + Send + Sync>> {
        let ids: Vec<ItemId> = sqlx::query_scalar(r#"SELECT id FROM item ORDER BY id"#)
            .fetch_all(&*repo.pool)
            .await?;
        Ok(ids)
    }
}

#[async_trait]
impl ListIds for ItemRepositoryImpl {
    async fn list_ids(&self) -> Result<Vec<ItemId>, Box<dyn Error + Send + Sync>> {
        Self::list_ids_impl(self).await
    }
}
