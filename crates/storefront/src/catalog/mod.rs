//! Product repository: the storefront's only source of product data.
//!
//! # Architecture
//!
//! - [`ProductRepository`] is the contract consumers are written against
//! - [`CatalogClient`] talks to a REST product API over `reqwest`
//! - In-memory caching via `moka` for API responses (5 minute TTL by default)
//! - [`InMemoryCatalog`] serves a fixed product list (offline mode, tests)
//!
//! Repository calls are fire-once. Failures are returned to the caller, which
//! decides how to surface them; nothing here touches cart or wishlist state.
//!
//! # Example
//!
//! ```rust,ignore
//! use mini_store_storefront::catalog::{CatalogClient, ProductRepository};
//!
//! let client = CatalogClient::new(&config.api)?;
//!
//! let first_page = client.list_page(1, 5).await?;
//! let product = client.get_product(first_page[0].id).await?;
//! session.cart_mut().add(product);
//! ```

mod cache;
mod client;
mod memory;

pub use client::CatalogClient;
pub use memory::InMemoryCatalog;

use std::future::Future;

use mini_store_core::{Product, ProductId};
use thiserror::Error;

/// Errors that can occur when fetching products.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Product API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No product with this ID exists upstream.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Page or limit outside the valid range.
    #[error("Invalid page request: page {page}, limit {limit} (both must be at least 1)")]
    InvalidPage {
        /// Requested page (1-indexed).
        page: u32,
        /// Requested page size.
        limit: u32,
    },

    /// The configured base URL cannot host product endpoints.
    #[error("Invalid product API URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Source of canonical product records.
///
/// Pages are 1-indexed. A page shorter than `limit` signals there are no more
/// pages.
pub trait ProductRepository {
    /// Fetch every product.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Fetch one page of at most `limit` products.
    fn list_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Fetch a single product.
    ///
    /// Fails with [`CatalogError::NotFound`] when the ID does not exist.
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

/// Reject page requests that can never be satisfied.
pub(crate) const fn check_page(page: u32, limit: u32) -> Result<(), CatalogError> {
    if page == 0 || limit == 0 {
        return Err(CatalogError::InvalidPage { page, limit });
    }
    Ok(())
}
