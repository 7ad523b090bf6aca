//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog quotes every price in US dollars as a plain JSON number, so a
//! `Price` is a decimal amount with a fixed `$` display. Decimal arithmetic
//! keeps cart totals exact (`109.95 * 3` is `329.85`, not `329.84999...`).

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the catalog's currency (USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of dollars.
    #[must_use]
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    /// Formats as `$400`, `$109.95` or `$22.3` (trailing zeros dropped).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_drops_trailing_zeros() {
        assert_eq!(Price::from_dollars(400).to_string(), "$400");
        assert_eq!(Price::from_cents(10995).to_string(), "$109.95");
        assert_eq!(Price::from_cents(2230).to_string(), "$22.3");
        assert_eq!(Price::ZERO.to_string(), "$0");
    }

    #[test]
    fn test_line_arithmetic_is_exact() {
        let line = Price::from_cents(10995) * 3;
        assert_eq!(line, Price::from_cents(32985));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_dollars(200), Price::from_dollars(200)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_dollars(400));

        let empty: Price = std::iter::empty().sum();
        assert!(empty.is_zero());
    }
}
