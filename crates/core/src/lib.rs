//! Mini Store Core - Product types and client-side shopping state.
//!
//! This crate provides the domain model shared by every Mini Store component:
//! - `storefront` - Product repository client, session, and checkout flow
//! - `cli` - Command-line front end and interactive shell
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP clients. Cart and wishlist stores are driven by a single reducer
//! ([`collection::ItemCollection::reduce`]) instantiated once per label.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, and products
//! - [`collection`] - Line items, operations, and the pure reducer
//! - [`store`] - Cart and wishlist stores owning one collection each
//! - [`search`] - The current search query

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod search;
pub mod store;
pub mod types;

pub use collection::{Cart, CollectionLabel, ItemCollection, LineItem, Operation, Wishlist};
pub use search::SearchState;
pub use store::{CartStore, Store, WishlistStore};
pub use types::*;
