//! Type-safe price representation using decimal arithmetic.
//!
//! The backend emits costs and balances as bare JSON numbers; `Decimal`
//! deserializes those losslessly, so money never passes through a float.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the store's single display currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply the unit price by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times() {
        let unit = Price::from(10u32);
        assert_eq!(unit.times(3), Price::from(30u32));
        assert_eq!(unit.times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from(20u32), Price::from(15u32)].into_iter().sum();
        assert_eq!(total, Price::from(35u32));

        let empty: Price = std::iter::empty::<Price>().sum();
        assert_eq!(empty, Price::ZERO);
    }

    #[test]
    fn test_deserialize_from_bare_number() {
        // The catalog encodes costs as numbers, not strings.
        let price: Price = serde_json::from_str("100").unwrap();
        assert_eq!(price, Price::from(100u32));

        let fractional: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(fractional.amount(), "19.99".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_display() {
        let price: Price = serde_json::from_str("25.5").unwrap();
        assert_eq!(price.to_string(), "25.5");
    }
}
