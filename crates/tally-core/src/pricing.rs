//! # Pricing Module
//!
//! Pure functions that combine a [`ProductRecord`] and an optional
//! [`DiscountRecord`] into prices and setting values.
//!
//! ## Discounted Price Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price = $149.99, percentage = 0.5%, round_down = true                  │
//! │                                                                         │
//! │  1. fraction  = round(0.5 / 100, 4)         = 0.0050                    │
//! │  2. discount  = round(149.99 × 0.0050, 2)   = round(0.749950, 2) = 0.75 │
//! │  3. price     = round(149.99 − 0.75, 2)     = 149.24                    │
//! │  4. round_down → floor(149.24)              = 149.00                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1 and 2 round separately. A single-stage `price × pct / 100` can
//! land on a different cent for percentages with more than two decimals.

use crate::money::Money;
use crate::types::{DiscountRecord, Percentage, ProductRecord, SettingValue};

/// Returns the price after the discount, or the base price without one.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::{pricing, DiscountRecord, Money, Percentage, ProductRecord, Settings};
///
/// let product = ProductRecord::new("test", "Test", Money::from_cents(5000), vec![], Settings::new());
/// let discount = DiscountRecord::new(Percentage::new(dec!(10)), false, Settings::new());
///
/// assert_eq!(pricing::effective_price(&product, Some(&discount)), Money::from_cents(4500));
/// assert_eq!(pricing::effective_price(&product, None), Money::from_cents(5000));
/// ```
pub fn effective_price(product: &ProductRecord, discount: Option<&DiscountRecord>) -> Money {
    let Some(discount) = discount else {
        return product.price();
    };

    let discounted = (product.price() - discount_dollars(product, Some(discount))).round_to_cents();

    if discount.round_down() {
        discounted.floor()
    } else {
        discounted
    }
}

/// Returns the dollar value of the discount, rounded to the cent.
///
/// Zero without a discount.
pub fn discount_dollars(product: &ProductRecord, discount: Option<&DiscountRecord>) -> Money {
    match discount {
        Some(discount) => product
            .price()
            .multiply(discount.percentage().as_fraction())
            .round_to_cents(),
        None => Money::zero(),
    }
}

/// Returns the discount percentage, or zero without a discount.
pub fn discount_percentage(discount: Option<&DiscountRecord>) -> Percentage {
    discount.map(DiscountRecord::percentage).unwrap_or_default()
}

pub fn has_discount(discount: Option<&DiscountRecord>) -> bool {
    discount.is_some()
}

/// Resolves a setting, letting a non-empty discount override win.
///
/// Empty overrides (see [`SettingValue::is_empty`]) fall through to the
/// product's own value. `None` means neither record has the key.
pub fn resolve_setting<'a>(
    key: &str,
    product: &'a ProductRecord,
    discount: Option<&'a DiscountRecord>,
) -> Option<&'a SettingValue> {
    discount
        .and_then(|d| d.override_setting(key))
        .filter(|value| !value.is_empty())
        .or_else(|| product.setting(key))
}

// =============================================================================
// Unit Tests
// =============================================================================
