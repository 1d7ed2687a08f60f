//! Mini Store CLI - Terminal front end for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the first page of products
//! mini-store products --page 1 --limit 5
//!
//! # Show one product
//! mini-store product 3
//!
//! # Search titles
//! mini-store search backpack
//!
//! # Interactive session with cart, wishlist and checkout
//! mini-store shell
//!
//! # Work offline from a saved `/products` response
//! mini-store --catalog-file products.json shell
//! ```
//!
//! # Commands
//!
//! - `products` - List one page (or all) of the catalog
//! - `product` - Show product details
//! - `search` - Filter products by title
//! - `shell` - Interactive loop owning the session's cart and wishlist

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod commands;
pub mod error;
pub mod render;

pub use catalog::Catalog;
pub use commands::shell::{Shell, ShellCommand, ShellError};
pub use error::CliError;
