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
//! │    2499 * 1.18 = 2948.8199999999997  ❌ WRONG!                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise for INR)                      │
//! │    249900 paise + 18% tax = 249900 + 44982 = 294882 paise              │
//! │    Every step is exact; rounding happens once, explicitly              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let price = Money::from_major(2499);     // ₹2499.00
//! let doubled = price * 2;                  // ₹4998.00
//! let total = price + Money::from_minor(50); // ₹2499.50
//! assert_eq!(total.minor(), 249950);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// Digits after the decimal point in a formatted amount.
pub const MINOR_DIGITS: u32 = 2;

/// Minor units per major unit (paise per rupee).
pub const MINOR_PER_MAJOR: i64 = 10_i64.pow(MINOR_DIGITS);

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a plain integer**: snapshots stay compact
///
/// ## Where Money is Used
/// ```text
/// Product.price ──┬──► CartLine.line_total ──► Cart.total
///                 │                                │
///                 └──► "₹2,499.00" in output       ▼
///                                        OrderSummary (tax, total)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_minor(89900); // Represents ₹899.00
    /// assert_eq!(price.minor(), 89900);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units (rupees).
    ///
    /// The seed catalog prices everything in whole rupees, so this is the
    /// most common constructor outside of arithmetic.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // ₹10.99
    /// assert_eq!(price.minor(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -₹5.50 (refund)
    /// assert_eq!(negative.minor(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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

    /// Calculates tax at the given rate, rounding half up on the minor unit.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 provides the
    /// rounding (5000/10000 = 0.5). i128 keeps large carts from overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    /// use bazaar_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_major(2499);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1800)); // 18% GST
    /// assert_eq!(tax.minor(), 44982); // ₹449.82
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_minor(tax.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let unit_price = Money::from_major(899);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_major(2697));
    /// ```
    ///
    /// Saturates at the i64 bounds. Use [`Money::checked_multiply_quantity`]
    /// where an out-of-range result must be rejected.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// `self × qty`, or `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// `self + other`, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// `self + other`, clamped to the i64 bounds.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering with the rupee sign.
///
/// ## Note
/// This is for logs and debugging. The storefront formats amounts for
/// display with digit grouping (see `StoreSettings::format_price`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_and_major() {
        let money = Money::from_minor(249950);
        assert_eq!(money.major(), 2499);
        assert_eq!(money.minor_part(), 50);

        assert_eq!(Money::from_major(899).minor(), 89900);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).minor(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).minor(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_minor(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_major(2499)), "₹2499.00");
        assert_eq!(format!("{}", Money::from_minor(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(100);
        let b = Money::from_major(50);

        assert_eq!(a + b, Money::from_major(150));
        assert_eq!(a - b, Money::from_major(50));
        assert_eq!(a * 3, Money::from_major(300));

        let mut c = a;
        c += b;
        c -= Money::from_major(25);
        assert_eq!(c, Money::from_major(125));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_major(200), Money::from_major(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_major(250));

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_gst_calculation() {
        // ₹100.00 at 18% = ₹18.00
        let tax = Money::from_major(100).calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax, Money::from_major(18));
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // ₹0.25 at 18% = 4.5 paise → 5 paise
        let tax = Money::from_minor(25).calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.minor(), 5);
    }

    #[test]
    fn test_overflow_is_detected_or_saturated() {
        let price = Money::from_major(2499);
        assert_eq!(price.checked_multiply_quantity(3), Some(Money::from_major(7497)));
        assert_eq!(price.checked_multiply_quantity(100_000_000_000_000), None);
        assert_eq!(price.multiply_quantity(i64::MAX), Money::from_minor(i64::MAX));

        let max = Money::from_minor(i64::MAX);
        assert_eq!(max.checked_add(Money::from_minor(1)), None);
        assert_eq!(max.saturating_add(Money::from_minor(1)), max);

        let tax = max.calculate_tax(TaxRate::from_bps(20_000));
        assert_eq!(tax, max);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_major(899)).unwrap();
        assert_eq!(json, "89900");
    }
}
