//! Rupee amounts backed by decimal arithmetic.

use core::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Amounts are non-negative by construction.
    #[error("money amount cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative amount of Indian rupees.
///
/// Backed by [`Decimal`] so menu prices and order totals never pick up
/// binary floating-point noise. Display renders whole rupees only
/// (`"₹565"`), rounding half-up at the display boundary; the stored
/// amount keeps its full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Currency symbol used for display.
    pub const SYMBOL: &'static str = "₹";

    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a `Money` from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a `Money` from a whole number of rupees.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if `rupees` is below zero.
    pub fn from_rupees(rupees: i64) -> Result<Self, MoneyError> {
        Self::new(Decimal::from(rupees))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a line-item quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Round half-up to whole rupees.
    #[must_use]
    pub fn to_whole_rupees(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format as a whole-rupee display string, e.g. `"₹565"`.
    ///
    /// No decimal places and no thousands separators, matching what the
    /// menu and checkout pages render.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", Self::SYMBOL, self.to_whole_rupees())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
