//! Mocked checkout.
//!
//! Checkout validates the customer's name and email, snapshots the store's
//! line items and total, then empties the store. There is no payment step and
//! no server-side order: the returned [`OrderConfirmation`] is the only record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use mini_store_core::{CollectionLabel, Email, LineItem, Price, Store};

/// Reasons a checkout is refused. The store is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty. Please add products to continue.")]
    EmptyCart,
    #[error("All fields must be filled.")]
    MissingFields,
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error("The order total is too large to process.")]
    TotalOverflow,
}

/// Customer details typed into the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
}

impl CheckoutForm {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Check that both fields are filled and the email is well formed.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::MissingFields`] if either field is blank, otherwise
    /// [`CheckoutError::InvalidEmail`] if the email does not parse.
    pub fn validate(&self) -> Result<Email, CheckoutError> {
        let email = self.email.trim();
        if self.name.trim().is_empty() || email.is_empty() {
            return Err(CheckoutError::MissingFields);
        }
        Email::parse(email).map_err(|_| CheckoutError::InvalidEmail)
    }
}

/// Receipt for a completed mock checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub reference: Uuid,
    pub customer_name: String,
    pub email: Email,
    pub items: Vec<LineItem>,
    pub item_count: u64,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

/// Check out every line in `store`, then clear it.
///
/// Works for the cart and the wishlist alike.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty store, the form's
/// validation error, or [`CheckoutError::TotalOverflow`] when the total cannot
/// be computed. The store is only cleared on success.
#[instrument(skip_all, fields(store = L::NAME))]
pub fn checkout<L: CollectionLabel>(
    store: &mut Store<L>,
    form: &CheckoutForm,
) -> Result<OrderConfirmation, CheckoutError> {
    if store.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let email = form.validate()?;
    let total = store.total().map_err(|_| CheckoutError::TotalOverflow)?;

    let confirmation = OrderConfirmation {
        reference: Uuid::new_v4(),
        customer_name: form.name.trim().to_string(),
        email,
        items: store.items().to_vec(),
        item_count: store.item_count(),
        total,
        placed_at: Utc::now(),
    };

    store.clear();

    info!(
        reference = %confirmation.reference,
        items = confirmation.item_count,
        total = %confirmation.total,
        "Checkout completed"
    );

    Ok(confirmation)
}
