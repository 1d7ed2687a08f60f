//! Line-item collections and the reducer that drives them.
//!
//! Cart and wishlist share one transition function. The two are told apart
//! only by a zero-sized label type, so they stay behaviorally identical while
//! remaining distinct types that cannot be mixed up.
//!
//! # Invariants
//!
//! - Every line item has `quantity >= 1`; a decrease that would reach zero
//!   removes the item instead.
//! - At most one line item per [`ProductId`].
//! - Items keep their insertion order; updating one item never moves another.

use core::fmt;
use core::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::types::{Price, PriceOverflow, Product, ProductId};

// =============================================================================
// Labels
// =============================================================================

/// Semantic label distinguishing otherwise identical collections.
pub trait CollectionLabel: fmt::Debug + Clone + Copy + Default + PartialEq + Eq + 'static {
    /// Human-readable name used in logs and messages.
    const NAME: &'static str;
}

/// Label for the shopping cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cart;

impl CollectionLabel for Cart {
    const NAME: &'static str = "cart";
}

/// Label for the wishlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wishlist;

impl CollectionLabel for Wishlist {
    const NAME: &'static str = "wishlist";
}

// =============================================================================
// LineItem
// =============================================================================

/// A product captured at insertion time plus a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Product ID of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the amount is out of range.
    pub fn line_total(&self) -> Result<Price, PriceOverflow> {
        self.product.price.times(self.quantity)
    }
}

// =============================================================================
// Operation
// =============================================================================

/// A state transition applied to an [`ItemCollection`].
///
/// Matching is exhaustive, so adding a variant without handling it in
/// [`ItemCollection::reduce`] does not compile.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Add one unit of a product, appending it if it is not present yet.
    Add(Product),
    /// Remove the line for a product.
    Remove(ProductId),
    /// Remove every line.
    Clear,
    /// Increase a line's quantity by one.
    Increase(ProductId),
    /// Decrease a line's quantity by one, removing it at zero.
    Decrease(ProductId),
}

impl Operation {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Clear => "clear",
            Self::Increase(_) => "increase",
            Self::Decrease(_) => "decrease",
        }
    }

    /// Product the operation targets, if any.
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::Add(product) => Some(product.id),
            Self::Remove(id) | Self::Increase(id) | Self::Decrease(id) => Some(*id),
            Self::Clear => None,
        }
    }
}

// =============================================================================
// ItemCollection
// =============================================================================

/// Ordered line items keyed by product ID.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCollection<L: CollectionLabel> {
    items: Vec<LineItem>,
    label: PhantomData<L>,
}

impl<L: CollectionLabel> Default for ItemCollection<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: CollectionLabel> ItemCollection<L> {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            label: PhantomData,
        }
    }

    /// Current line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity` over every line, in decimal arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if a line total or the sum is out of range.
    pub fn total(&self) -> Result<Price, PriceOverflow> {
        Price::try_sum(self.items.iter().map(LineItem::line_total))
    }

    /// Compute the next collection from this one and an operation.
    ///
    /// Total for every input; operations on absent IDs leave the collection
    /// unchanged. An `Add` for a product already present only bumps the
    /// quantity: the captured title and price are not refreshed.
    #[must_use]
    pub fn reduce(mut self, operation: Operation) -> Self {
        match operation {
            Operation::Add(product) => {
                if let Some(item) = self.find_mut(product.id) {
                    item.quantity = item.quantity.saturating_add(1);
                } else {
                    self.items.push(LineItem::new(product));
                }
            }
            Operation::Remove(id) => {
                self.items.retain(|item| item.id() != id);
            }
            Operation::Clear => {
                self.items.clear();
            }
            Operation::Increase(id) => {
                if let Some(item) = self.find_mut(id) {
                    item.quantity = item.quantity.saturating_add(1);
                }
            }
            Operation::Decrease(id) => {
                if let Some(item) = self.find_mut(id) {
                    item.quantity -= 1;
                }
                self.items.retain(|item| item.quantity > 0);
            }
        }
        self
    }

    fn find_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id() == id)
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
            image: format!("https://example.com/{id}.png"),
            rating: None,
        }
    }

    fn apply(ops: impl IntoIterator<Item = Operation>) -> ItemCollection<Cart> {
        ops.into_iter()
            .fold(ItemCollection::new(), ItemCollection::reduce)
    }

    fn ids(collection: &ItemCollection<Cart>) -> Vec<i32> {
        collection.items().iter().map(|i| i.id().as_i32()).collect()
    }

    #[test]
    fn test_add_appends_with_quantity_one() {
        let cart = apply([Operation::Add(product(1, "1.00"))]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_repeated_add_increments_single_line() {
        let p = product(1, "1.00");
        let cart = apply([
            Operation::Add(p.clone()),
            Operation::Add(p.clone()),
            Operation::Add(p),
        ]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_does_not_refresh_captured_fields() {
        let original = product(1, "10.00");
        let mut repriced = original.clone();
        repriced.price = "99.00".parse().unwrap();
        repriced.title = "Renamed".to_string();

        let cart = apply([Operation::Add(original), Operation::Add(repriced)]);
        let item = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.product.title, "Product 1");
        assert_eq!(item.product.price, "10.00".parse().unwrap());
    }

    #[test]
    fn test_add_add_increase_yields_three() {
        let p = product(1, "1.00");
        let cart = apply([
            Operation::Add(p.clone()),
            Operation::Add(p),
            Operation::Increase(ProductId::new(1)),
        ]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_order_preserved_when_earlier_item_updated() {
        let a = product(1, "1.00");
        let b = product(2, "2.00");
        let cart = apply([
            Operation::Add(a.clone()),
            Operation::Add(b),
            Operation::Add(a),
            Operation::Increase(ProductId::new(1)),
        ]);
        assert_eq!(ids(&cart), vec![1, 2]);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let cart = apply([
            Operation::Add(product(1, "1.00")),
            Operation::Add(product(2, "1.00")),
            Operation::Add(product(3, "1.00")),
            Operation::Remove(ProductId::new(2)),
        ]);
        assert_eq!(ids(&cart), vec![1, 3]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let before = apply([Operation::Add(product(1, "1.00"))]);
        let after = before.clone().reduce(Operation::Remove(ProductId::new(9)));
        assert_eq!(before, after);
    }

    #[test]
    fn test_increase_and_decrease_missing_are_noops() {
        let before = apply([Operation::Add(product(1, "1.00"))]);
        let after = before
            .clone()
            .reduce(Operation::Increase(ProductId::new(9)))
            .reduce(Operation::Decrease(ProductId::new(9)));
        assert_eq!(before, after);
    }

    #[test]
    fn test_clear_empties_collection() {
        let cart = apply([
            Operation::Add(product(1, "1.00")),
            Operation::Add(product(2, "1.00")),
            Operation::Clear,
        ]);
        assert!(cart.is_empty());

        let empty = ItemCollection::<Cart>::new().reduce(Operation::Clear);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_decrease_from_one_removes_item() {
        let cart = apply([
            Operation::Add(product(1, "1.00")),
            Operation::Decrease(ProductId::new(1)),
        ]);
        assert!(cart.get(ProductId::new(1)).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_repeated_decrease_never_leaves_zero_quantity() {
        let p = product(1, "1.00");
        let mut cart = apply([Operation::Add(p.clone()), Operation::Add(p.clone()), Operation::Add(p)]);
        for expected in [2, 1] {
            cart = cart.reduce(Operation::Decrease(ProductId::new(1)));
            assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, expected);
        }
        for _ in 0..3 {
            cart = cart.reduce(Operation::Decrease(ProductId::new(1)));
            assert!(cart.items().iter().all(|item| item.quantity >= 1));
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total() {
        let ten = product(1, "10.00");
        let five_fifty = product(2, "5.50");
        let cart = apply([
            Operation::Add(ten.clone()),
            Operation::Add(ten),
            Operation::Add(five_fifty.clone()),
            Operation::Add(five_fifty.clone()),
            Operation::Add(five_fifty),
        ]);
        assert_eq!(cart.total().unwrap(), "36.50".parse().unwrap());
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_total_of_empty_is_zero() {
        assert_eq!(ItemCollection::<Wishlist>::new().total(), Ok(Price::ZERO));
    }

    #[test]
    fn test_total_overflow_is_reported() {
        let huge = product(1, "70000000000000000000000000000");
        let cart = apply([Operation::Add(huge), Operation::Increase(ProductId::new(1))]);

        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].line_total(), Err(PriceOverflow));
        assert_eq!(cart.total(), Err(PriceOverflow));

        let cart = cart.reduce(Operation::Decrease(ProductId::new(1)));
        assert_eq!(cart.total(), Ok("70000000000000000000000000000".parse().unwrap()));
    }

    #[test]
    fn test_total_overflow_across_lines() {
        let cart = apply([
            Operation::Add(product(1, "50000000000000000000000000000")),
            Operation::Add(product(2, "50000000000000000000000000000")),
        ]);
        assert_eq!(cart.total(), Err(PriceOverflow));
    }

    #[test]
    fn test_operation_product_id() {
        assert_eq!(Operation::Clear.product_id(), None);
        assert_eq!(
            Operation::Decrease(ProductId::new(4)).product_id(),
            Some(ProductId::new(4))
        );
        assert_eq!(Operation::Add(product(5, "1")).kind(), "add");
    }

    #[test]
    fn test_line_item_serializes_flat() {
        let cart = apply([Operation::Add(product(1, "2.50"))]);
        let json = serde_json::to_value(&cart.items()[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["price"], "2.50");
    }
}
