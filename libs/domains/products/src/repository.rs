use async_trait::async_trait;
use futures::stream::BoxStream;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::constraints;
use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// Persistence port for products.
///
/// Every method is a single atomic storage operation; composing them (as
/// update does) carries no transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert when `id` is `None`, otherwise overwrite the row with that id.
    /// Returns the record as stored, with its assigned id.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Every product in id order, produced lazily.
    fn find_all(&self) -> BoxStream<'static, ProductResult<Product>>;

    /// Remove the row if present. A missing id is not an error.
    async fn delete_by_id(&self, id: i64) -> ProductResult<()>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Emulates the name uniqueness constraint so constraint translation can be
/// exercised without a database. `find_all` walks the map with an id cursor,
/// one row per lock acquisition, so writes made while a listing is consumed
/// are visible to it.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let duplicate = products
            .values()
            .any(|p| p.name == product.name && p.id != product.id);
        if duplicate {
            return Err(ProductError::DataIntegrity {
                constraint: Some(constraints::NAME_UNIQUE.to_string()),
                detail: format!(
                    "duplicate key value violates unique constraint \"{}\"",
                    constraints::NAME_UNIQUE
                ),
            });
        }

        let id = match product.id {
            Some(id) if products.contains_key(&id) => id,
            Some(id) => return Err(ProductError::NotFound(id)),
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        product.id = Some(id);
        products.insert(id, product.clone());

        tracing::info!(product_id = id, "Saved product");
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    fn find_all(&self) -> BoxStream<'static, ProductResult<Product>> {
        let products = self.products.clone();

        Box::pin(async_stream::stream! {
            let mut after = Bound::Unbounded;
            loop {
                let next = products
                    .read()
                    .await
                    .range((after, Bound::Unbounded))
                    .next()
                    .map(|(id, product)| (*id, product.clone()));

                let Some((id, product)) = next else { break };
                after = Bound::Excluded(id);
                yield Ok::<_, ProductError>(product);
            }
        })
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let mut products = self.products.write().await;
        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }
}
