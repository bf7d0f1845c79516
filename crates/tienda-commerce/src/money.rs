//! Money type for cart and order totals.
//!
//! Prices are stored on products as plain decimals (`precio`), but totals are
//! summed in integer cents so `10 * 2 + 5.5` comes out as exactly `25.5`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A monetary value in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Non-finite input counts as zero.
    ///
    /// ```
    /// use tienda_commerce::money::Money;
    /// let price = Money::from_decimal(59.99);
    /// assert_eq!(price.amount_cents, 5999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Self::zero();
        }
        Self::new((amount * 100.0).round() as i64)
    }

    /// Zero.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$59.99").
    pub fn display(&self) -> String {
        format!("${}", self.display_amount())
    }

    /// Format without symbol (e.g., "59.99").
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.to_decimal())
    }

    /// Add, returning `None` on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents.checked_mul(factor).map(Money::new)
    }

    /// Sum an iterator of Money values, returning `None` on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99).amount_cents, 4999);
        assert_eq!(Money::from_decimal(5.5).amount_cents, 550);
        assert_eq!(Money::from_decimal(f64::NAN), Money::zero());
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(2550);
        assert!((m.to_decimal() - 25.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999).display(), "$49.99");
        assert_eq!(Money::new(100).display_amount(), "1.00");
    }

    #[test]
    fn test_money_multiply_and_sum() {
        let items = [Money::new(1000).try_multiply(2).unwrap(), Money::new(550)];
        let total = Money::try_sum(items.iter()).unwrap();
        assert_eq!(total.amount_cents, 2550);
    }

    #[test]
    fn test_money_overflow() {
        assert!(Money::new(i64::MAX).try_multiply(2).is_none());
        assert!(Money::new(i64::MAX).try_add(&Money::new(1)).is_none());
    }
}
