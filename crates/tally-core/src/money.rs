//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    149.99 * 0.005 = 0.7499499999999999  ❌ WRONG!                        │
//! │                                                                         │
//! │  A discount percentage is not always a whole number of cents, so       │
//! │  integer cents alone cannot hold the intermediate values either.       │
//! │                                                                         │
//! │  OUR SOLUTION: Fixed-point decimal                                      │
//! │    149.99 * 0.0050 = 0.749950 (exact)                                   │
//! │    Rounded to cents only where the pricing rules say so                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! let total = price + Money::from_cents(500); // $15.99
//! assert_eq!(total.cents(), 1599);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Number of decimal places in a rounded money value.
pub const CENT_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in major currency units (dollars for USD).
///
/// ## Design Decisions
/// - **Decimal (signed)**: Allows negative values, which a discount above 100%
///   can legitimately produce
/// - **Unrounded storage**: Intermediate products keep full precision until a
///   pricing rule rounds them with [`Money::round_to_cents`]
/// - **Transparent serde**: Serialized as the bare decimal, deserialized from
///   either a number or a numeric string
///
/// ## Where Money is Used
/// ```text
/// ProductRecord.price ──┬──► Product::original_price()
///                       │
///                       └──► pricing::effective_price() ──► Product::current_price()
///                                   │
///                                   └──► pricing::discount_dollars()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CENT_PLACES))
    }

    /// Creates a Money value from a decimal amount in major units.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_decimal(dec!(149.99));
    /// assert_eq!(price.cents(), 14999);
    /// ```
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount in major units.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the value in cents, rounded half away from zero.
    ///
    /// Saturates at the `i64` bounds for amounts that cannot be expressed
    /// in cents.
    pub fn cents(&self) -> i64 {
        let saturated = if self.0.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        self.round_to_cents()
            .0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .unwrap_or(saturated)
    }

    /// Returns the major unit (dollars) portion, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    pub fn dollars(&self) -> i64 {
        self.cents() / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub fn cents_part(&self) -> i64 {
        (self.cents() % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to two decimal places, midpoints away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::money::Money;
    ///
    /// let raw = Money::from_decimal(dec!(0.749950));
    /// assert_eq!(raw.round_to_cents().amount(), dec!(0.75));
    /// ```
    pub fn round_to_cents(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Rounds down to the nearest whole unit (149.25 becomes 149.00).
    ///
    /// Floors toward negative infinity, so -0.50 becomes -1.00.
    pub fn floor(&self) -> Self {
        Money(self.0.floor())
    }

    /// Multiplies by a decimal factor without rounding.
    ///
    /// Saturates at the `Decimal` bounds instead of overflowing.
    #[inline]
    pub fn multiply(&self, factor: Decimal) -> Self {
        let negative = self.0.is_sign_negative() != factor.is_sign_negative();
        Money(self.0.checked_mul(factor).unwrap_or_else(|| saturate(negative)))
    }
}

fn saturate(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal dollar format, the only currency formatting this crate does.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(
            self.0
                .checked_add(other.0)
                .unwrap_or_else(|| saturate(self.0.is_sign_negative())),
        )
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(
            self.0
                .checked_sub(other.0)
                .unwrap_or_else(|| saturate(self.0.is_sign_negative())),
        )
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
