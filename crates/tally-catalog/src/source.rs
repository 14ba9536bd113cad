//! # Product Sources
//!
//! Where the registry gets product definitions on a cache miss.
//!
//! The registry only needs one thing from a source: given a SKU, a
//! [`ProductRecord`] plus an optional [`DiscountRecord`], or `NotFound`.

use std::sync::Arc;

use tally_core::{DiscountRecord, ProductRecord};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::sale::{SaleBook, SaleLookup};

/// A record and the discount resolved for it.
pub type LoadedProduct = (ProductRecord, Option<DiscountRecord>);

/// Supplies product definitions by SKU.
pub trait ProductSource: Send + Sync {
    /// Loads the definition for `sku`.
    ///
    /// ## Errors
    /// `CatalogError::NotFound` if the source has no entry for the SKU.
    fn load(&self, sku: &str) -> CatalogResult<LoadedProduct>;
}

/// Catalog-file backed source; discounts come from the entry's sale.
pub struct ConfigSource {
    config: CatalogConfig,
    sales: Arc<dyn SaleLookup>,
}

impl ConfigSource {
    /// Creates a source whose sales come from the same catalog.
    pub fn new(config: CatalogConfig) -> Self {
        let sales = Arc::new(SaleBook::from_config(&config));
        ConfigSource { config, sales }
    }

    /// Creates a source with an external sale lookup.
    pub fn with_sales(config: CatalogConfig, sales: Arc<dyn SaleLookup>) -> Self {
        ConfigSource { config, sales }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

impl std::fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSource")
            .field("products", &self.config.products.len())
            .field("sales", &self.config.sales.len())
            .finish()
    }
}

impl ProductSource for ConfigSource {
    fn load(&self, sku: &str) -> CatalogResult<LoadedProduct> {
        let entry = self
            .config
            .product(sku)
            .ok_or_else(|| CatalogError::not_found("Product", sku))?;

        let record = entry.to_record(sku);

        let discount = match &entry.sale {
            Some(sale_id) => self.sales.find_discount(sale_id, record.tags())?,
            None => None,
        };

        Ok((record, discount))
    }
}
