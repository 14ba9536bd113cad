//! # Catalog Configuration
//!
//! The declarative catalog file: product definitions and the sales whose
//! discounts may apply to them.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Path Priority                                │
//! │                                                                         │
//! │  1. Explicit path (CatalogConfig::load(Some(path)), `quote --catalog`)  │
//! │  2. Environment variable TALLY_CATALOG                                  │
//! │  3. Platform config dir                                                 │
//! │     ~/.config/tally/catalog.toml (Linux)                                │
//! │     ~/Library/Application Support/com.tally.tally/catalog.toml (macOS) │
//! │                                                                         │
//! │  An explicit path that does not exist is an error. A missing default    │
//! │  file yields an empty catalog.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [products.test]
//! name = "Test Product"
//! price = "50.00"
//! tags = ["test"]
//! sale = "spring"
//!
//! [products.test.settings]
//! original_setting = "original"
//!
//! [sales.spring]
//! name = "Spring Sale"
//!
//! [[sales.spring.discounts]]
//! tags = ["test"]
//! percentage = "10"
//! round_down = false
//!
//! [sales.spring.discounts.override_settings]
//! overridden_setting = "overridden"
//! ```
//!
//! Files ending in `.json` are parsed as JSON with the same shape.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::{DiscountRecord, Money, Percentage, ProductRecord, Settings};
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};

/// Environment variable naming the catalog file.
pub const CATALOG_ENV: &str = "TALLY_CATALOG";

// =============================================================================
// Product Entry
// =============================================================================

/// One product definition, keyed by SKU in [`CatalogConfig::products`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Defaults to the table key. If present it must equal the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    pub name: String,

    /// Base price; a number or a numeric string.
    pub price: Money,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub settings: Settings,

    /// Sale whose discounts are matched against `tags`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale: Option<String>,
}

impl ProductEntry {
    /// Builds the product record for this entry stored under `key`.
    pub fn to_record(&self, key: &str) -> ProductRecord {
        ProductRecord::new(
            self.sku.as_deref().unwrap_or(key),
            self.name.clone(),
            self.price,
            self.tags.clone(),
            self.settings.clone(),
        )
    }
}

// =============================================================================
// Sale Entries
// =============================================================================

/// A named sale: an ordered list of tag-matched discounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleEntry {
    #[serde(default)]
    pub name: String,

    /// Checked in order; the first match wins.
    #[serde(default)]
    pub discounts: Vec<DiscountEntry>,
}

/// A discount applied to products carrying any of `tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountEntry {
    pub tags: Vec<String>,

    pub percentage: Percentage,

    #[serde(default)]
    pub round_down: bool,

    #[serde(default)]
    pub override_settings: Settings,
}

impl DiscountEntry {
    /// Returns true if the product tags share at least one tag with this entry.
    pub fn matches<S: AsRef<str>>(&self, product_tags: &[S]) -> bool {
        product_tags
            .iter()
            .any(|tag| self.tags.iter().any(|t| t == tag.as_ref()))
    }

    pub fn to_record(&self) -> DiscountRecord {
        DiscountRecord::new(
            self.percentage,
            self.round_down,
            self.override_settings.clone(),
        )
    }
}

// =============================================================================
// Catalog Configuration
// =============================================================================

/// Complete catalog: products by SKU and sales by ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub products: BTreeMap<String, ProductEntry>,

    #[serde(default)]
    pub sales: BTreeMap<String, SaleEntry>,
}

impl CatalogConfig {
    /// Loads the catalog from a file, the environment, or the default path.
    ///
    /// ## Load Order (first hit wins)
    /// 1. `path` argument
    /// 2. `TALLY_CATALOG` environment variable
    /// 3. Default config path (empty catalog if the file is missing)
    pub fn load(path: Option<PathBuf>) -> CatalogResult<Self> {
        let explicit = path.or_else(|| std::env::var_os(CATALOG_ENV).map(PathBuf::from));

        let config = match explicit {
            Some(path) => Self::from_path(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_path(&path)?,
                Some(path) => {
                    debug!(?path, "Catalog file not found, using empty catalog");
                    Self::default()
                }
                None => {
                    debug!("No config directory available, using empty catalog");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads and parses one catalog file; `.json` selects JSON, anything else TOML.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        info!(?path, "Loading catalog from file");

        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };

        debug!(
            products = config.products.len(),
            sales = config.sales.len(),
            "Catalog parsed"
        );
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Checks cross-references inside the catalog.
    ///
    /// SKU uniqueness is guaranteed by the map; SKU format is not checked.
    pub fn validate(&self) -> CatalogResult<()> {
        for (key, entry) in &self.products {
            if let Some(sku) = &entry.sku {
                if sku != key {
                    return Err(CatalogError::InvalidConfig(format!(
                        "product '{}' declares sku '{}'",
                        key, sku
                    )));
                }
            }

            if let Some(sale) = &entry.sale {
                if !self.sales.contains_key(sale) {
                    return Err(CatalogError::InvalidConfig(format!(
                        "product '{}' references undefined sale '{}'",
                        key, sale
                    )));
                }
            }
        }

        for (id, sale) in &self.sales {
            if let Some(index) = sale.discounts.iter().position(|d| d.tags.is_empty()) {
                return Err(CatalogError::InvalidConfig(format!(
                    "sale '{}' discount #{} has no tags",
                    id, index
                )));
            }
        }

        Ok(())
    }

    /// Returns the entry for a SKU.
    pub fn product(&self, sku: &str) -> Option<&ProductEntry> {
        self.products.get(sku)
    }

    pub fn sale(&self, id: &str) -> Option<&SaleEntry> {
        self.sales.get(id)
    }

    /// Returns the default catalog file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CATALOG: &str = r#"
        [products.test]
        name = "Test Product"
        price = "50.00"
        tags = ["test"]
        sale = "spring"

        [products.test.settings]
        original_setting = "original"
        limit = 3

        [products.mug]
        name = "Mug"
        price = 12.5

        [sales.spring]
        name = "Spring Sale"

        [[sales.spring.discounts]]
        tags = ["test", "apparel"]
        percentage = "10"

        [sales.spring.discounts.override_settings]
        overridden_setting = "overridden"
    "#;

    #[test]
    fn test_parse_toml_catalog() {
        let config = CatalogConfig::from_toml_str(CATALOG).unwrap();
        assert!(config.validate().is_ok());

        let test = config.product("test").unwrap();
        assert_eq!(test.price, Money::from_cents(5000));
        assert_eq!(test.sale.as_deref(), Some("spring"));
        assert_eq!(test.settings["limit"].as_i64(), Some(3));

        let mug = config.product("mug").unwrap();
        assert_eq!(mug.price.amount(), dec!(12.5));
        assert!(mug.tags.is_empty());

        let spring = config.sale("spring").unwrap();
        assert_eq!(spring.name, "Spring Sale");
        assert_eq!(spring.discounts.len(), 1);
        assert!(!spring.discounts[0].round_down);
    }

    #[test]
    fn test_entry_to_record_defaults_sku_to_key() {
        let config = CatalogConfig::from_toml_str(CATALOG).unwrap();
        let record = config.product("mug").unwrap().to_record("mug");
        assert_eq!(record.sku(), "mug");
        assert_eq!(record.name(), "Mug");
    }

    #[test]
    fn test_parse_json_catalog() {
        let json = r#"{
            "products": {
                "tee": { "name": "Tee", "price": "19.99", "tags": ["apparel"] }
            }
        }"#;
        let config = CatalogConfig::from_json_str(json).unwrap();
        assert_eq!(config.product("tee").unwrap().price, Money::from_cents(1999));
        assert!(config.sales.is_empty());
    }

    #[test]
    fn test_validate_rejects_undefined_sale() {
        let mut config = CatalogConfig::from_toml_str(CATALOG).unwrap();
        config.sales.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("undefined sale 'spring'"));
    }

    #[test]
    fn test_validate_rejects_mismatched_sku() {
        let mut config = CatalogConfig::from_toml_str(CATALOG).unwrap();
        config.products.get_mut("mug").unwrap().sku = Some("cup".to_string());
        assert!(matches!(
            config.validate(),
            Err(CatalogError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_untagged_discount() {
        let mut config = CatalogConfig::from_toml_str(CATALOG).unwrap();
        config.sales.get_mut("spring").unwrap().discounts[0].tags.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_catalog_is_parse_error() {
        let err = CatalogConfig::from_toml_str("[products.x]\nprice = \"abc\"").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_discount_entry_matches_any_tag() {
        let config = CatalogConfig::from_toml_str(CATALOG).unwrap();
        let entry = &config.sale("spring").unwrap().discounts[0];
        assert!(entry.matches(&["misc", "apparel"]));
        assert!(!entry.matches(&["misc"]));
        assert!(!entry.matches::<&str>(&[]));
    }
}
