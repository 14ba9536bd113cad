//! # Product Facade
//!
//! [`Product`] binds one [`ProductRecord`], at most one [`DiscountRecord`],
//! and the [`pricing`](crate::pricing) functions into a read-only object.
//!
//! ## Binding
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Product                                                         │
//! │  ├── record:   ProductRecord          (fixed at construction)    │
//! │  └── discount: Option<DiscountRecord> (fixed at construction)    │
//! │                                                                  │
//! │  current_price() ──► pricing::effective_price(record, discount)  │
//! │  setting(key)    ──► pricing::resolve_setting(key, ...)          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing;
use crate::types::{DiscountRecord, Percentage, ProductRecord, SettingValue};

/// A product with its (optional) discount applied.
///
/// There is no way to swap the discount after construction; build a new
/// `Product` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    record: ProductRecord,
    discount: Option<DiscountRecord>,
}

impl Product {
    /// Creates a product facade.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::{DiscountRecord, Money, Percentage, Product, ProductRecord, Settings};
    ///
    /// let record = ProductRecord::new("test", "Test", Money::from_cents(5000), vec![], Settings::new());
    /// let discount = DiscountRecord::new(Percentage::new(dec!(10)), false, Settings::new());
    /// let product = Product::new(record, Some(discount));
    ///
    /// assert_eq!(product.current_price(), Money::from_cents(4500));
    /// assert_eq!(product.discount_dollars(), Money::from_cents(500));
    /// ```
    pub fn new(record: ProductRecord, discount: Option<DiscountRecord>) -> Self {
        Product { record, discount }
    }

    /// Creates a product with no discount.
    pub fn undiscounted(record: ProductRecord) -> Self {
        Product::new(record, None)
    }

    pub fn sku(&self) -> &str {
        self.record.sku()
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }

    pub fn tags(&self) -> &[String] {
        self.record.tags()
    }

    /// The base price, before any discount.
    pub fn original_price(&self) -> Money {
        self.record.price()
    }

    /// The price with the discount applied.
    pub fn current_price(&self) -> Money {
        pricing::effective_price(&self.record, self.discount.as_ref())
    }

    /// Resolves a setting with discount overrides taken into account.
    pub fn setting(&self, key: &str) -> Option<&SettingValue> {
        pricing::resolve_setting(key, &self.record, self.discount.as_ref())
    }

    /// Like [`Product::setting`], but a missing key is an error.
    pub fn require_setting(&self, key: &str) -> CoreResult<&SettingValue> {
        self.setting(key).ok_or_else(|| CoreError::MissingSetting {
            sku: self.sku().to_string(),
            key: key.to_string(),
        })
    }

    pub fn has_discount(&self) -> bool {
        pricing::has_discount(self.discount.as_ref())
    }

    pub fn discount_percentage(&self) -> Percentage {
        pricing::discount_percentage(self.discount.as_ref())
    }

    pub fn discount_dollars(&self) -> Money {
        pricing::discount_dollars(&self.record, self.discount.as_ref())
    }

    pub fn record(&self) -> &ProductRecord {
        &self.record
    }

    pub fn discount(&self) -> Option<&DiscountRecord> {
        self.discount.as_ref()
    }

    /// Snapshot of the computed values.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            sku: self.sku().to_string(),
            name: self.name().to_string(),
            original_price: self.original_price(),
            current_price: self.current_price(),
            has_discount: self.has_discount(),
            discount_percentage: self.discount_percentage(),
            discount_dollars: self.discount_dollars(),
        }
    }
}

/// Serializable view of a [`Product`]'s computed prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub sku: String,
    pub name: String,
    pub original_price: Money,
    pub current_price: Money,
    pub has_discount: bool,
    pub discount_percentage: Percentage,
    pub discount_dollars: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Settings;
    use rust_decimal_macros::dec;

    fn test_record() -> ProductRecord {
        let mut settings = Settings::new();
        settings.insert("original_setting".to_string(), "original".into());
        ProductRecord::new(
            "test",
            "Test Product",
            Money::from_decimal(dec!(50.00)),
            vec!["test".to_string()],
            settings,
        )
    }

    fn test_discount() -> DiscountRecord {
        let mut overrides = Settings::new();
        overrides.insert("overridden_setting".to_string(), "overridden".into());
        DiscountRecord::new(Percentage::new(dec!(10)), false, overrides)
    }

    #[test]
    fn test_discounted_product_accessors() {
        let product = Product::new(test_record(), Some(test_discount()));

        assert_eq!(product.sku(), "test");
        assert_eq!(product.name(), "Test Product");
        assert_eq!(product.original_price().amount(), dec!(50.00));
        assert_eq!(product.current_price().amount(), dec!(45.00));
        assert!(product.has_discount());
        assert_eq!(product.discount_percentage().value(), dec!(10));
        assert_eq!(product.discount_dollars().amount(), dec!(5.00));
        assert_eq!(
            product.setting("original_setting").and_then(|v| v.as_str()),
            Some("original")
        );
        assert_eq!(
            product.setting("overridden_setting").and_then(|v| v.as_str()),
            Some("overridden")
        );
    }

    #[test]
    fn test_undiscounted_product_accessors() {
        let product = Product::undiscounted(test_record());

        assert_eq!(product.current_price(), product.original_price());
        assert!(product.discount_dollars().is_zero());
        assert!(product.discount_percentage().is_zero());
        assert!(!product.has_discount());
        assert!(product.discount().is_none());
    }

    #[test]
    fn test_require_setting_reports_missing_key() {
        let product = Product::undiscounted(test_record());
        assert!(product.require_setting("original_setting").is_ok());

        let err = product.require_setting("colour").unwrap_err();
        assert_eq!(err.to_string(), "Setting 'colour' not found for product test");
    }

    #[test]
    fn test_summary_serializes() {
        let product = Product::new(test_record(), Some(test_discount()));
        let summary = product.summary();
        assert_eq!(summary.current_price, Money::from_cents(4500));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["sku"], "test");
        assert_eq!(json["has_discount"], true);
    }
}
