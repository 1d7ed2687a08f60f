//! REST product API client.
//!
//! Uses `reqwest` for HTTP and caches successful responses with `moka`.
//! Failed requests are never cached and never retried.

use std::sync::Arc;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;

use mini_store_core::{Product, ProductId};

use super::cache::{CacheKey, CacheValue};
use super::{CatalogError, ProductRepository, check_page};
use crate::config::CatalogApiConfig;

/// Longest slice of an error body kept for diagnostics.
const ERROR_BODY_CHARS: usize = 200;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for a `/products` REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    products_url: Url,
    api_key: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new product API client.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the base URL cannot be
    /// extended with the products path.
    pub fn new(config: &CatalogApiConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        let base = config.base_url.as_str().trim_end_matches('/');
        let path = config.products_path.trim_matches('/');
        let products_url = Url::parse(&format!("{base}/{path}"))?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                products_url,
                api_key: config.api_key.clone(),
                cache,
            }),
        })
    }

    /// The product list endpoint this client reads from.
    #[must_use]
    pub fn products_url(&self) -> &Url {
        &self.inner.products_url
    }

    /// GET `url` and return the body of a successful response.
    async fn fetch(&self, url: Url) -> Result<String, CatalogError> {
        let mut request = self
            .inner
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(api_key) = &self.inner.api_key {
            request = request.header("X-api-key", api_key.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %body.chars().take(ERROR_BODY_CHARS).collect::<String>(),
                "Product API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_CHARS).collect(),
            });
        }

        Ok(body)
    }

    /// Fetch a product list, consulting the cache first.
    async fn fetch_products(&self, key: CacheKey, url: Url) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!(?key, "Cache hit for products");
            return Ok(products);
        }

        let body = self.fetch(url).await?;
        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(ERROR_BODY_CHARS).collect::<String>(),
                "Failed to parse product list"
            );
            CatalogError::Parse(e)
        })?;

        debug!(?key, count = products.len(), "Fetched products");
        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }
}

impl ProductRepository for CatalogClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.inner.products_url.clone();
        self.fetch_products(CacheKey::AllProducts, url).await
    }

    #[instrument(skip(self))]
    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<Product>, CatalogError> {
        check_page(page, limit)?;

        let mut url = self.inner.products_url.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        self.fetch_products(CacheKey::Page { page, limit }, url)
            .await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = Url::parse(&format!("{}/{id}", self.inner.products_url))?;

        let body = match self.fetch(url).await {
            Ok(body) => body,
            Err(CatalogError::Status { status: 404, .. }) => {
                return Err(CatalogError::NotFound(id));
            }
            Err(e) => return Err(e),
        };

        // Some demo APIs answer unknown IDs with 200 and an empty or null body
        if body.trim().is_empty() {
            return Err(CatalogError::NotFound(id));
        }
        let product = serde_json::from_str::<Option<Product>>(&body)?
            .ok_or(CatalogError::NotFound(id))?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }
}
