//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Daily profit = revenue - cost must hold to the cent, every day.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Stored, summed and subtracted as i64 cents.                          │
//! │    Decimals exist only at the HTTP boundary.                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::from_cents(350); // $3.50
//! let line = price.checked_multiply_quantity(3).unwrap(); // $10.50
//! let total = line.checked_add(Money::from_cents(425)).unwrap();
//! assert_eq!(total.cents(), 1475);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use ts_rs::TS;

use crate::error::ValidationError;

/// Largest decimal amount accepted from clients (ten million dollars).
const MAX_DECIMAL_AMOUNT: f64 = 10_000_000.0;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as profit may be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.price_cents ──► OrderItem.price_at_sale_cents (snapshot)      │
/// │  Product.cost_cents  ──► OrderItem.cost_at_sale_cents  (snapshot)      │
/// │                                                                         │
/// │  Σ qty × price_at_sale ──► revenue ─┐                                   │
/// │  Σ qty × cost_at_sale  ──► cost    ─┴─► profit = revenue - cost        │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount received over the wire into cents.
    ///
    /// Rounds half away from zero to the nearest cent. This is the ONLY
    /// place a float becomes Money, and it happens at the HTTP boundary.
    ///
    /// ## Rules
    /// - Must be finite
    /// - Magnitude at most ten million
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal("total_amount", 15.0).unwrap().cents(), 1500);
    /// assert_eq!(Money::from_decimal("total_amount", 0.1 + 0.2).unwrap().cents(), 30);
    /// assert!(Money::from_decimal("total_amount", f64::NAN).is_err());
    /// ```
    pub fn from_decimal(field: &str, amount: f64) -> Result<Self, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        if amount.abs() > MAX_DECIMAL_AMOUNT {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: -(MAX_DECIMAL_AMOUNT as i64),
                max: MAX_DECIMAL_AMOUNT as i64,
            });
        }

        Ok(Money((amount * 100.0).round() as i64))
    }

    /// Returns the value as a decimal number of major units (for JSON only).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1599).to_decimal(), 15.99);
    /// ```
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity; `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(500); // $5.00
    /// assert_eq!(unit_price.checked_multiply_quantity(3).unwrap().cents(), 1500);
    /// assert!(Money::from_cents(i64::MAX / 2).checked_multiply_quantity(3).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts; `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// Used in logs and error messages. The frontend formats for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Subtraction for differences of non-negative totals (profit).
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.checked_multiply_quantity(3), Some(Money::from_cents(3000)));
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let huge = Money::from_cents(i64::MAX / 2 + 1);

        assert_eq!(huge.checked_multiply_quantity(2), None);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(1), Some(Money::from_cents(i64::MAX)));
    }

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal("x", 15.0).unwrap().cents(), 1500);
        assert_eq!(Money::from_decimal("x", 3.333).unwrap().cents(), 333);
        assert_eq!(Money::from_decimal("x", 0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal("x", 7.996).unwrap().cents(), 800);
        assert_eq!(Money::from_decimal("x", -1.5).unwrap().cents(), -150);
    }

    #[test]
    fn test_from_decimal_rejects_garbage() {
        assert!(Money::from_decimal("x", f64::INFINITY).is_err());
        assert!(Money::from_decimal("x", f64::NAN).is_err());
        assert!(Money::from_decimal("x", 1e12).is_err());
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(900).to_decimal(), 9.0);
        assert_eq!(Money::from_cents(-125).to_decimal(), -1.25);
    }

    /// Profit must reconcile to the cent, which floats cannot promise.
    #[test]
    fn test_profit_is_exact_in_cents() {
        let revenue = Money::from_cents(10)
            .checked_multiply_quantity(3)
            .and_then(|r| r.checked_add(Money::from_cents(20)))
            .unwrap();
        let cost = Money::from_cents(7).checked_multiply_quantity(3).unwrap();
        let profit = revenue - cost;
        assert_eq!(profit, revenue - cost);
        assert_eq!(profit.cents(), 29);
        assert!(!profit.is_negative());
    }
}
