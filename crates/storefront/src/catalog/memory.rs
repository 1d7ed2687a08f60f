//! Fixed in-memory product list.

use std::sync::Arc;

use mini_store_core::{Product, ProductId};

use super::{CatalogError, ProductRepository, check_page};

/// A product repository backed by a fixed list, with the same paging
/// semantics as the HTTP API.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<[Product]>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// Parse a JSON array of products, as returned by `GET /products`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an array of products.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductRepository for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.to_vec())
    }

    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<Product>, CatalogError> {
        check_page(page, limit)?;

        let limit = limit as usize;
        let skip = (page as usize - 1).saturating_mul(limit);
        Ok(self
            .products
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
