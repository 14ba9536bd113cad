//! # Domain Types
//!
//! The records the pricing engine operates over.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │  ProductRecord  │   │   DiscountRecord    │   │  SettingValue   │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  sku            │   │  percentage         │   │  Bool           │   │
//! │  │  name           │   │  round_down         │   │  Integer        │   │
//! │  │  price (Money)  │   │  override_settings  │   │  Float          │   │
//! │  │  tags           │   └─────────────────────┘   │  Text           │   │
//! │  │  settings       │                             │  List           │   │
//! │  └─────────────────┘   ┌─────────────────────┐   └─────────────────┘   │
//! │                        │     Percentage      │                         │
//! │                        │  25.00 = 25% off    │                         │
//! │                        └─────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are plain values. They carry setters for callers that build them
//! incrementally, but nothing in the pricing engine mutates them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::money::Money;

/// Decimal places kept when a percentage is converted to a fraction.
pub const FRACTION_PLACES: u32 = 4;

// =============================================================================
// Percentage
// =============================================================================

/// A discount percentage, where `25.00` means 25% off.
///
/// Values outside 0-100 are accepted as-is; a percentage above 100 yields a
/// negative discounted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Creates a percentage from its decimal value.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Percentage(value)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(Decimal::ZERO)
    }

    /// Returns the percentage value (25.00 for 25%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the percentage as a fraction of one, rounded to 4 places.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::types::Percentage;
    ///
    /// assert_eq!(Percentage::new(dec!(25)).as_fraction(), dec!(0.25));
    /// assert_eq!(Percentage::new(dec!(33.33333)).as_fraction(), dec!(0.3333));
    /// ```
    pub fn as_fraction(&self) -> Decimal {
        (self.0 / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(FRACTION_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

impl From<Decimal> for Percentage {
    fn from(value: Decimal) -> Self {
        Percentage(value)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Setting Values
// =============================================================================

/// A heterogeneous product setting value.
///
/// Deserialized untagged, so a catalog file can write `limit = 5`,
/// `gift_wrap = true` or `badge = "sale"` directly. JSON `null` maps to
/// [`SettingValue::Null`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<SettingValue>),
}

impl SettingValue {
    /// Loose emptiness check used by discount override precedence.
    ///
    /// `null`, `false`, `0`, `0.0`, `""`, `"0"` and the empty list are all
    /// empty. An empty override never shadows the product's own setting.
    pub fn is_empty(&self) -> bool {
        match self {
            SettingValue::Null => true,
            SettingValue::Bool(b) => !*b,
            SettingValue::Integer(i) => *i == 0,
            SettingValue::Float(x) => *x == 0.0,
            SettingValue::Text(s) => s.is_empty() || s == "0",
            SettingValue::List(items) => items.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Float(x) => Some(*x),
            SettingValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Null => Ok(()),
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Float(x) => write!(f, "{}", x),
            SettingValue::Text(s) => f.write_str(s),
            SettingValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

/// Key/value settings with unique keys and sorted iteration.
pub type Settings = BTreeMap<String, SettingValue>;

// =============================================================================
// Product Record
// =============================================================================

/// The stored data of one product.
///
/// ## Fields
/// - `sku`: unique identifier. Uniqueness and format are the caller's
///   responsibility; nothing here validates them.
/// - `tags`: insertion order kept, duplicates tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    sku: String,
    name: String,
    price: Money,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    settings: Settings,
}

impl ProductRecord {
    /// Creates a product record.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Money, ProductRecord, Settings};
    ///
    /// let record = ProductRecord::new(
    ///     "TSHIRT-RED",
    ///     "Red T-Shirt",
    ///     Money::from_cents(1999),
    ///     vec!["apparel".to_string()],
    ///     Settings::new(),
    /// );
    /// assert!(record.has_tag("apparel"));
    /// ```
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        tags: Vec<String>,
        settings: Settings,
    ) -> Self {
        ProductRecord {
            sku: sku.into(),
            name: name.into(),
            price,
            tags,
            settings,
        }
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn set_sku(&mut self, sku: impl Into<String>) {
        self.sku = sku.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The base price, before any discount.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn set_price(&mut self, price: Money) {
        self.price = price;
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    pub fn add_tags<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Returns a setting, or `None` when the key is not set.
    pub fn setting(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_setting(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.settings.insert(key.into(), value.into());
    }

    /// Merges settings in; existing keys are overwritten.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings.extend(settings);
    }
}

// =============================================================================
// Discount Record
// =============================================================================

/// A price discount that may apply to one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRecord {
    percentage: Percentage,
    /// Floor the discounted price to a whole unit (149.25 becomes 149.00).
    #[serde(default)]
    round_down: bool,
    /// Values that shadow the product's settings of the same key.
    #[serde(default)]
    override_settings: Settings,
}

impl DiscountRecord {
    pub fn new(percentage: Percentage, round_down: bool, override_settings: Settings) -> Self {
        DiscountRecord {
            percentage,
            round_down,
            override_settings,
        }
    }

    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    pub fn set_percentage(&mut self, percentage: Percentage) {
        self.percentage = percentage;
    }

    pub fn round_down(&self) -> bool {
        self.round_down
    }

    pub fn set_round_down(&mut self, round_down: bool) {
        self.round_down = round_down;
    }

    pub fn override_setting(&self, key: &str) -> Option<&SettingValue> {
        self.override_settings.get(key)
    }

    pub fn override_settings(&self) -> &Settings {
        &self.override_settings
    }

    pub fn set_override_setting(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.override_settings.insert(key.into(), value.into());
    }

    pub fn set_override_settings(&mut self, settings: Settings) {
        self.override_settings.extend(settings);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
