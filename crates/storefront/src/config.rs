//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `STORE_API_URL` - Product API base URL (default: `https://fakestoreapi.com`)
//! - `STORE_PRODUCTS_PATH` - Path of the product list under the base URL (default: `products`)
//! - `STORE_API_KEY` - API key sent as `X-api-key` (for keyed upstreams)
//! - `STORE_CACHE_TTL_SECS` - How long fetched products stay fresh (default: 300)
//! - `STORE_CACHE_CAPACITY` - Maximum cached responses (default: 1000)
//! - `STORE_PAGE_SIZE` - Products per page when browsing (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_PRODUCTS_PATH: &str = "products";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: u64 = 1000;
const DEFAULT_PAGE_SIZE: u32 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Product API configuration
    pub api: CatalogApiConfig,
    /// Products per page when browsing
    pub page_size: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Product API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CatalogApiConfig {
    /// Base URL of the product API
    pub base_url: Url,
    /// Product list path under `base_url`; single products live at `{path}/{id}`
    pub products_path: String,
    /// Optional API key
    pub api_key: Option<SecretString>,
    /// Freshness window for cached responses
    pub cache_ttl: Duration,
    /// Maximum number of cached responses
    pub cache_capacity: u64,
}

impl std::fmt::Debug for CatalogApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("products_path", &self.products_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl CatalogApiConfig {
    /// Configuration for `base_url` with default caching and no API key.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            products_path: DEFAULT_PRODUCTS_PATH.to_string(),
            api_key: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(lookup);

        let base_url = env.or_default("STORE_API_URL", DEFAULT_API_URL);
        let base_url = Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_API_URL".to_string(), e.to_string()))?;

        let products_path = env.or_default("STORE_PRODUCTS_PATH", DEFAULT_PRODUCTS_PATH);
        let api_key = env.optional("STORE_API_KEY").map(SecretString::from);
        let cache_ttl = Duration::from_secs(env.parsed("STORE_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?);
        let cache_capacity = env.parsed("STORE_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;

        let page_size = env.parsed("STORE_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STORE_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api: CatalogApiConfig {
                base_url,
                products_path,
                api_key,
                cache_ttl,
                cache_capacity,
            },
            page_size,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a variable parsed as `T`, falling back to `default` when unset.
    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
