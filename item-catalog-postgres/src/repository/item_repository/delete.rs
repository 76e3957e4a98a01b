use async_trait::async_trait;
use item_catalog_api::ItemId;
use item_catalog_db::repository::delete::Delete;
use std::error::Error;

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    pub(super) async fn delete_impl(
        repo: &ItemRepositoryImpl,
        id: ItemId,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let result = sqlx::query(r#"DELETE FROM item WHERE id = $1"#)
            .bind(id)
            .execute(&*repo.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Delete for ItemRepositoryImpl {
    async fn delete(&self, id: ItemId) -> Result<bool, Box<dyn Error + Send + Sync>> {
        Self::delete_impl(self, id).await
    }
}
