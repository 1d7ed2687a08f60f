//! Mini Store Storefront - Product browsing, session state, and checkout.
//!
//! # Architecture
//!
//! - [`catalog`] - Product repository contract, REST client, in-memory catalog
//! - [`pagination`] - Prev/next paging and infinite-scroll feeds
//! - [`search`] - Title filtering driven by the session's search query
//! - [`session`] - The application root owning cart, wishlist and search state
//! - [`checkout`] - Form validation and the mocked checkout flow
//!
//! Repository results never mutate the stores directly: the front end takes a
//! fetched [`mini_store_core::Product`] and calls the store operation itself.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod pagination;
pub mod search;
pub mod session;

pub use catalog::{CatalogClient, CatalogError, InMemoryCatalog, ProductRepository};
pub use checkout::{CheckoutError, CheckoutForm, OrderConfirmation, checkout};
pub use config::{CatalogApiConfig, ConfigError, StoreConfig};
pub use error::AppError;
pub use pagination::{Pager, ProductFeed};
pub use search::filter_by_title;
pub use session::Session;
