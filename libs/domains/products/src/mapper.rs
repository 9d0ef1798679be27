//! Record to transfer object conversion.

use futures::{Stream, TryStreamExt};

use crate::models::{Product, ReadProduct};

impl From<Product> for ReadProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            category: product.category,
            image_url: product.image_url,
            status: product.status,
        }
    }
}

pub fn to_read_products(products: impl IntoIterator<Item = Product>) -> Vec<ReadProduct> {
    products.into_iter().map(ReadProduct::from).collect()
}

/// Map each record of a fallible stream, passing errors through untouched.
pub fn map_stream<S, E>(products: S) -> impl Stream<Item = Result<ReadProduct, E>>
where
    S: Stream<Item = Result<Product, E>>,
{
    products.map_ok(ReadProduct::from)
}
