use async_stream::try_stream;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{Stream, TryStreamExt};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::Product,
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// Owns its connection handle so the stream outlives the request that opened it
fn stream_all(db: DatabaseConnection) -> impl Stream<Item = ProductResult<Product>> + Send {
    try_stream! {
        let mut rows = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .stream(&db)
            .await?;

        while let Some(model) = rows.try_next().await? {
            yield Product::from(model);
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn save(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let active_model: entity::ActiveModel = product.into();

        let model = match id {
            None => active_model.insert(&self.db).await?,
            Some(id) => match active_model.update(&self.db).await {
                Ok(model) => model,
                Err(DbErr::RecordNotUpdated) => return Err(ProductError::NotFound(id)),
                Err(e) => return Err(e.into()),
            },
        };

        tracing::info!(product_id = model.id, "Saved product");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    fn find_all(&self) -> BoxStream<'static, ProductResult<Product>> {
        Box::pin(stream_all(self.db.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductStatus;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, name: &str) -> entity::Model {
        let now = Utc::now();
        entity::Model {
            id,
            name: name.to_string(),
            description: Some("A widget".to_string()),
            price: rust_decimal::Decimal::new(999, 2),
            quantity: 5,
            category: "Tools".to_string(),
            image_url: "http://x/img".to_string(),
            brand: None,
            status: ProductStatus::Active,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7, "Widget")]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.find_by_id(7).await.unwrap().unwrap();

        assert_eq!(product.id, Some(7));
        assert_eq!(product.name, "Widget");
    }

    #[tokio::test]
    async fn test_find_by_id_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.find_by_id(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Widget")]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let mut product: Product = model(0, "Widget").into();
        product.id = None;

        let saved = repo.save(product).await.unwrap();
        assert_eq!(saved.id, Some(1));
    }

    #[tokio::test]
    async fn test_delete_of_missing_row_is_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.delete_by_id(404).await.is_ok());
    }

    #[tokio::test]
    async fn test_unique_violation_becomes_data_integrity() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(
                r#"duplicate key value violates unique constraint "tbl_product_name_key""#
                    .to_string(),
            )])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let mut product: Product = model(0, "Widget").into();
        product.id = None;

        match repo.save(product).await.unwrap_err() {
            ProductError::DataIntegrity { constraint, .. } => {
                assert_eq!(constraint.as_deref(), Some("tbl_product_name_key"));
            }
            other => panic!("expected data integrity error, got {:?}", other),
        }
    }
}
