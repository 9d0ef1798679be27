use axum_helpers::flatten_validation_errors;
use chrono::Utc;
use futures::StreamExt;
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::mapper;
use crate::models::{CreateProduct, Product, ReadProduct, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Persist a new product, returning it with its assigned id
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: CreateProduct) -> ProductResult<ReadProduct> {
        let saved = self.save_valid(Product::new(input, Utc::now())).await?;

        tracing::info!(product_id = ?saved.id, "Product created");
        Ok(saved.into())
    }

    /// Lazily stream every product in id order.
    ///
    /// A storage failure surfaces as an `Err` item, after which the stream ends.
    pub fn get_all(&self) -> BoxStream<'static, ProductResult<ReadProduct>> {
        mapper::map_stream(self.repository.find_all()).boxed()
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> ProductResult<ReadProduct> {
        self.repository
            .find_by_id(id)
            .await?
            .map(ReadProduct::from)
            .ok_or(ProductError::NotFound(id))
    }

    /// Read-modify-write of every mutable field. Nothing is written when the id is absent.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<()> {
        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.apply(input, Utc::now());
        self.save_valid(product).await?;

        tracing::info!(product_id = id, "Product updated");
        Ok(())
    }

    /// Delete by id; an absent id is not an error
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ProductResult<()> {
        self.repository.delete_by_id(id).await
    }

    async fn save_valid(&self, product: Product) -> ProductResult<Product> {
        product
            .validate()
            .map_err(|e| ProductError::Validation(flatten_validation_errors(&e)))?;

        tracing::debug!(
            product_id = ?product.id,
            insert = !product.is_persisted(),
            "Saving product"
        );
        self.repository.save(product).await
    }
}
