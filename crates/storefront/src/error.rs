//! Unified error handling.
//!
//! Front ends work with a single [`AppError`]; each module keeps its own
//! error type and converts into this one with `?`.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Product repository operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout was refused.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message suitable for showing to the user.
    ///
    /// Transport details are kept out of the message; they are logged instead.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NotFound(id)) => format!("Product {id} not found"),
            Self::Catalog(CatalogError::RateLimited(secs)) => {
                format!("Too many requests, try again in {secs} seconds")
            }
            Self::Catalog(err @ CatalogError::InvalidPage { .. }) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::Catalog(_) => "Failed to fetch products. Please try again.".to_string(),
            Self::Config(_) | Self::Internal(_) => "Internal error".to_string(),
        }
    }

    /// Whether this error points at a bug or outage rather than user input.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        match self {
            Self::Catalog(err) => !matches!(
                err,
                CatalogError::NotFound(_) | CatalogError::InvalidPage { .. }
            ),
            Self::Config(_) | Self::Internal(_) => true,
            Self::Checkout(_) | Self::BadRequest(_) => false,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
