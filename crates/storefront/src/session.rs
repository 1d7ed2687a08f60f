//! Per-session application root.
//!
//! A [`Session`] is built once when the front end starts and owns every piece
//! of client-side state. Consumers receive `&`/`&mut` borrows of the part they
//! need; nothing is reachable through globals.

use mini_store_core::{CartStore, SearchState, WishlistStore};

/// Cart, wishlist and search state for one user session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    cart: CartStore,
    wishlist: WishlistStore,
    search: SearchState,
}

impl Session {
    /// Start a session with empty stores and an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cart: CartStore::new(),
            wishlist: WishlistStore::new(),
            search: SearchState::new(),
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn search(&self) -> &SearchState {
        &self.search
    }

    pub const fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }
}
