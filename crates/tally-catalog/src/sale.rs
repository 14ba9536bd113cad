//! # Sale Lookup
//!
//! Maps a product's tags to the one discount a sale grants it.
//!
//! ```text
//! product: sale = "spring", tags = ["shoes", "summer"]
//!      │
//!      ▼
//! SaleBook["spring"].discounts (declaration order)
//!   #0 tags = ["outerwear"]          ✗
//!   #1 tags = ["summer", "swim"]     ✓  ← first match wins
//!   #2 tags = ["shoes"]              (never reached: no stacking)
//! ```

use std::collections::BTreeMap;

use tally_core::DiscountRecord;
use tracing::debug;

use crate::config::{CatalogConfig, SaleEntry};
use crate::error::{CatalogError, CatalogResult};

/// Resolves the discount a sale grants to a set of tags.
pub trait SaleLookup: Send + Sync {
    /// Returns the discount for `tags` under `sale_id`, if any.
    ///
    /// Fails with `NotFound` when the sale itself is unknown.
    fn find_discount(&self, sale_id: &str, tags: &[String]) -> CatalogResult<Option<DiscountRecord>>;
}

/// In-memory sale table built from a catalog.
#[derive(Debug, Clone, Default)]
pub struct SaleBook {
    sales: BTreeMap<String, SaleEntry>,
}

impl SaleBook {
    pub fn new(sales: BTreeMap<String, SaleEntry>) -> Self {
        SaleBook { sales }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        SaleBook::new(config.sales.clone())
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

impl SaleLookup for SaleBook {
    fn find_discount(&self, sale_id: &str, tags: &[String]) -> CatalogResult<Option<DiscountRecord>> {
        let sale = self
            .sales
            .get(sale_id)
            .ok_or_else(|| CatalogError::not_found("Sale", sale_id))?;

        let found = sale
            .discounts
            .iter()
            .position(|entry| entry.matches(tags));

        match found {
            Some(index) => {
                debug!(sale = %sale_id, index, "Sale discount matched");
                Ok(Some(sale.discounts[index].to_record()))
            }
            None => {
                debug!(sale = %sale_id, ?tags, "No sale discount matches tags");
                Ok(None)
            }
        }
    }
}
