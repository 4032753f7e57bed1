//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM IN A CHANGE LOOP                            │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    remaining = 0.30; remaining -= 0.10 (×3)  →  5.55e-17  ❌ NOT ZERO   │
//! │    "Cannot provide exact change" even though the coins exist            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    remaining = 30; remaining -= 10 (×3)  →  0  ✅                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::money::Money;
//!
//! // Create from cents (the only constructor)
//! let price = Money::from_cents(350); // $3.50
//!
//! let paid = price + Money::from_cents(150);
//! assert_eq!(paid.cents(), 500);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(3.5); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as `inserted - price` stay in-type
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for receipts and audit reports
///
/// ## Where Money is Used
/// ```text
/// Product.price ─────────────┐
///                            ├──► purchase() ──► change amount ──► Change
/// InsertedCoins.total() ─────┘
///
/// CoinStock.total_value() ──► audits / conservation checks
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtracts `other`, returning `None` if the result would be negative.
    ///
    /// Used when a shortfall is a business outcome rather than a number:
    /// `inserted.checked_sub(price)` is `None` exactly when funds are short.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let paid = Money::from_cents(850);
    /// assert_eq!(paid.checked_sub(Money::from_cents(500)), Some(Money::from_cents(350)));
    /// assert_eq!(Money::from_cents(350).checked_sub(Money::from_cents(500)), None);
    /// ```
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        let diff = self.0.checked_sub(other.0)?;
        (diff >= 0).then_some(Money(diff))
    }

    /// Multiplies a face value by a coin count.
    ///
    /// Validated face values are at most `MAX_FACE_VALUE_CENTS`, so any `u32`
    /// count fits in `i64`.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let five = Money::from_cents(500);
    /// assert_eq!(five.multiply_count(4).cents(), 2000);
    /// ```
    #[inline]
    pub const fn multiply_count(&self, count: u32) -> Self {
        Money(self.0 * count as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly `$M.mm` rendering.
///
/// ## Note
/// Real display goes through the driver's currency configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor_part())
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
