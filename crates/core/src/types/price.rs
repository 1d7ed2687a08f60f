//! Type-safe price representation using decimal arithmetic.
//!
//! Upstream catalogs disagree on the wire shape of a price: one sends a
//! decimal string (`"10.00"`), the other a JSON number (`109.95`). `Decimal`'s
//! deserializer accepts both, so a [`Price`] can be read from either.
//!
//! Prices come from outside, so arithmetic on them is checked: an amount too
//! large for `Decimal` yields [`PriceOverflow`] instead of panicking.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An amount exceeded the range `Decimal` can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount is too large to compute")]
pub struct PriceOverflow;

/// A monetary amount in the catalog's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the product is out of range.
    pub fn times(self, quantity: u32) -> Result<Self, PriceOverflow> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Self)
            .ok_or(PriceOverflow)
    }

    /// Sum of two prices.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the sum is out of range.
    pub fn checked_add(self, rhs: Self) -> Result<Self, PriceOverflow> {
        self.0.checked_add(rhs.0).map(Self).ok_or(PriceOverflow)
    }

    /// Sum every price, stopping at the first overflow.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if any partial sum is out of range.
    pub fn try_sum<I>(prices: I) -> Result<Self, PriceOverflow>
    where
        I: IntoIterator<Item = Result<Self, PriceOverflow>>,
    {
        prices
            .into_iter()
            .try_fold(Self::ZERO, |total, price| total.checked_add(price?))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl core::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Decimal>().map(Self)
    }
}
