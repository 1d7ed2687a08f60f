//! Cart and wishlist stores.
//!
//! A [`Store`] owns exactly one [`ItemCollection`] and routes every mutation
//! through [`ItemCollection::reduce`]. Stores are plain values: construct them
//! at the application root and pass references to whatever needs them.

use tracing::debug;

use crate::collection::{Cart, CollectionLabel, ItemCollection, LineItem, Operation, Wishlist};
use crate::types::{Price, PriceOverflow, Product, ProductId};

/// The shopping cart store.
pub type CartStore = Store<Cart>;

/// The wishlist store.
pub type WishlistStore = Store<Wishlist>;

/// A line-item store labelled `L`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store<L: CollectionLabel> {
    collection: ItemCollection<L>,
}

impl<L: CollectionLabel> Store<L> {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            collection: ItemCollection::new(),
        }
    }

    /// The store's label name (`"cart"` or `"wishlist"`).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        L::NAME
    }

    /// Current snapshot of the line items.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.collection.items()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.collection.get(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.collection.item_count()
    }

    /// Derived total, recomputed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the total is out of range.
    pub fn total(&self) -> Result<Price, PriceOverflow> {
        self.collection.total()
    }

    /// Apply an operation synchronously.
    pub fn dispatch(&mut self, operation: Operation) {
        let kind = operation.kind();
        let product_id = operation.product_id();
        let collection = std::mem::take(&mut self.collection);
        self.collection = collection.reduce(operation);
        debug!(
            store = L::NAME,
            operation = kind,
            product_id = ?product_id,
            lines = self.collection.len(),
            "store updated"
        );
    }

    pub fn add(&mut self, product: Product) {
        self.dispatch(Operation::Add(product));
    }

    pub fn remove(&mut self, id: ProductId) {
        self.dispatch(Operation::Remove(id));
    }

    pub fn clear(&mut self) {
        self.dispatch(Operation::Clear);
    }

    pub fn increase_quantity(&mut self, id: ProductId) {
        self.dispatch(Operation::Increase(id));
    }

    pub fn decrease_quantity(&mut self, id: ProductId) {
        self.dispatch(Operation::Decrease(id));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: price.parse().unwrap(),
            category: "test".to_string(),
            description: String::new(),
            image: String::new(),
            rating: None,
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = CartStore::new();
        assert!(store.is_empty());
        assert_eq!(store.total(), Ok(Price::ZERO));
        assert_eq!(store.label(), "cart");
    }

    #[test]
    fn test_mutations_visible_to_next_read() {
        let mut cart = CartStore::new();
        cart.add(product(1, "10.00"));
        cart.add(product(2, "5.50"));
        cart.increase_quantity(ProductId::new(1));
        cart.increase_quantity(ProductId::new(2));
        cart.increase_quantity(ProductId::new(2));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total().unwrap(), "36.50".parse().unwrap());

        cart.decrease_quantity(ProductId::new(2));
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, 2);

        cart.remove(ProductId::new(1));
        assert_eq!(cart.items().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_and_wishlist_are_independent() {
        let mut cart = CartStore::new();
        let mut wishlist = WishlistStore::new();

        cart.add(product(1, "1.00"));
        wishlist.add(product(2, "2.00"));
        wishlist.clear();

        assert_eq!(cart.items().len(), 1);
        assert!(wishlist.is_empty());
        assert_eq!(wishlist.label(), "wishlist");
    }

    #[test]
    fn test_dispatch_matches_named_methods() {
        let mut by_method = WishlistStore::new();
        by_method.add(product(1, "1.00"));
        by_method.decrease_quantity(ProductId::new(1));

        let mut by_dispatch = WishlistStore::new();
        by_dispatch.dispatch(Operation::Add(product(1, "1.00")));
        by_dispatch.dispatch(Operation::Decrease(ProductId::new(1)));

        assert_eq!(by_method, by_dispatch);
        assert!(by_dispatch.is_empty());
    }
}
