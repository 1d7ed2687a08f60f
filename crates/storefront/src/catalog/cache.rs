//! Cache types for product API responses.

use mini_store_core::{Product, ProductId};

/// Cache key: one entry per distinct request.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    AllProducts,
    Page { page: u32, limit: u32 },
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
}
