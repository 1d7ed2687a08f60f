//! Repository selection: live API or an offline product file.

use std::path::Path;

use mini_store_core::{Product, ProductId};
use mini_store_storefront::{
    CatalogApiConfig, CatalogClient, CatalogError, InMemoryCatalog, ProductRepository,
};
use tracing::info;

use crate::error::CliError;

/// The product repository the CLI reads from.
#[derive(Clone)]
pub enum Catalog {
    /// REST product API.
    Remote(CatalogClient),
    /// Products loaded from a JSON file.
    Offline(InMemoryCatalog),
}

impl Catalog {
    /// Use the product file when given, otherwise the configured API.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the API URL
    /// is unusable.
    pub async fn open(api: &CatalogApiConfig, catalog_file: Option<&Path>) -> Result<Self, CliError> {
        if let Some(path) = catalog_file {
            let json = tokio::fs::read_to_string(path).await?;
            let catalog = InMemoryCatalog::from_json(&json)?;
            info!(path = %path.display(), products = catalog.len(), "Using offline catalog");
            return Ok(Self::Offline(catalog));
        }

        let client = CatalogClient::new(api)?;
        info!(url = %client.products_url(), "Using product API");
        Ok(Self::Remote(client))
    }
}

impl ProductRepository for Catalog {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Remote(client) => client.list_products().await,
            Self::Offline(catalog) => catalog.list_products().await,
        }
    }

    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Remote(client) => client.list_page(page, limit).await,
            Self::Offline(catalog) => catalog.list_page(page, limit).await,
        }
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        match self {
            Self::Remote(client) => client.get_product(id).await,
            Self::Offline(catalog) => catalog.get_product(id).await,
        }
    }
}
