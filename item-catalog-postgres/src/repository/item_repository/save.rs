use async_trait::async_trait;
use item_catalog_api::ItemId;
use item_catalog_db::models::item::ItemModel;
use item_catalog_db::repository::save::Save;
use std::error::Error;

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    pub(super) async fn save_impl(
        repo: &ItemRepositoryImpl,
        mut item: ItemModel,
    ) -> Result<ItemModel, Box<dyn Error + Send + Sync>> {
        let id: ItemId = match item.id {
            None => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO item (name, description, status, email)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(item.name.as_str())
                .bind(item.description.as_str())
                .bind(item.status.as_ref().map(|s| s.as_str()))
                .bind(item.email.as_str())
                .fetch_one(&*repo.pool)
                .await?
            }
            Some(id) => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO item (id, name, description, status, email)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (id) DO UPDATE
                    SET name = EXCLUDED.name,
                        description = EXCLUDED.description,
                        status = EXCLUDED.status,
                        email = EXCLUDED.email
                    RETURNING id
                    "#,
                )
                .bind(id)
                .bind(item.name.as_str())
                .bind(item.description.as_str())
                .bind(item.status.as_ref().map(|s| s.as_str()))
                .bind(item.email.as_str())
                .fetch_one(&*repo.pool)
                .await?
            }
        };

        item.id = Some(id);
        Ok(item)
    }
}

#[async_trait]
impl Save<ItemModel> for ItemRepositoryImpl {
    async fn save(&self, item: ItemModel) -> Result<ItemModel, Box<dyn Error + Send + Sync>> {
        Self::save_impl(self, item).await
    }
}
