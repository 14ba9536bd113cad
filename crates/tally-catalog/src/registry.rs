//! # Product Registry
//!
//! Loads [`Product`] facades on first request and hands out the cached
//! instance afterwards.
//!
//! ## Cache Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    get("test") under concurrency                        │
//! │                                                                         │
//! │  Thread A ──┐                                                           │
//! │  Thread B ──┼──► lock map ──► slot for "test" (created once) ──► unlock │
//! │  Thread C ──┘                        │                                  │
//! │                                      ▼                                  │
//! │                        OnceCell::get_or_try_init                        │
//! │                        • one thread runs source.load("test")            │
//! │                        • the others block on the same slot              │
//! │                        • all receive the same Arc<Product>              │
//! │                                                                         │
//! │  The map lock is never held during a load, so slow loads of one SKU    │
//! │  do not block other SKUs.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loaded entries are never evicted. A failed load drops its slot, so the
//! next `get` retries it and unknown SKUs leave nothing behind.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::OnceCell;
use tally_core::{DiscountRecord, Money, Percentage, Product, ProductRecord, Settings};
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::source::{ConfigSource, ProductSource};

type Slot = Arc<OnceCell<Arc<Product>>>;

/// Per-SKU cache of product facades in front of a [`ProductSource`].
///
/// ## Usage
/// ```rust
/// use tally_catalog::{CatalogConfig, ProductRegistry};
///
/// let config = CatalogConfig::from_toml_str(r#"
///     [products.mug]
///     name = "Mug"
///     price = "12.50"
/// "#).unwrap();
/// let registry = ProductRegistry::from_config(config);
///
/// let first = registry.get("mug").unwrap();
/// let again = registry.get("mug").unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &again));
/// ```
pub struct ProductRegistry {
    source: Box<dyn ProductSource>,
    products: Mutex<HashMap<String, Slot>>,
}

impl ProductRegistry {
    /// Creates an empty registry in front of `source`.
    pub fn new(source: impl ProductSource + 'static) -> Self {
        ProductRegistry {
            source: Box::new(source),
            products: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a registry over a parsed catalog.
    pub fn from_config(config: CatalogConfig) -> Self {
        ProductRegistry::new(ConfigSource::new(config))
    }

    /// Loads the catalog (see [`CatalogConfig::load`]) and wraps it.
    pub fn load(path: Option<PathBuf>) -> CatalogResult<Self> {
        Ok(ProductRegistry::from_config(CatalogConfig::load(path)?))
    }

    /// Returns the product for `sku`, loading it on first request.
    ///
    /// ## Errors
    /// `CatalogError::NotFound` if the source has no entry for the SKU.
    /// Not retried internally; failures are not cached.
    pub fn get(&self, sku: &str) -> CatalogResult<Arc<Product>> {
        let slot = self.slot(sku);

        if let Some(product) = slot.get() {
            debug!(sku = %sku, "Product cache hit");
            return Ok(Arc::clone(product));
        }

        let loaded = slot.get_or_try_init(|| {
            info!(sku = %sku, "Loading product");
            let (record, discount) = self.source.load(sku)?;
            debug!(
                sku = %sku,
                has_discount = discount.is_some(),
                "Product loaded"
            );
            Ok::<_, CatalogError>(Arc::new(Product::new(record, discount)))
        });

        match loaded {
            Ok(product) => Ok(Arc::clone(product)),
            Err(e) => {
                self.release(sku, &slot);
                Err(e)
            }
        }
    }

    /// Builds an uncached product with no discount.
    pub fn create(
        sku: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        tags: Vec<String>,
        settings: Settings,
    ) -> Product {
        Product::undiscounted(ProductRecord::new(sku, name, price, tags, settings))
    }

    /// Builds a discount record.
    pub fn new_discount(
        percentage: Percentage,
        round_down: bool,
        override_settings: Settings,
    ) -> DiscountRecord {
        DiscountRecord::new(percentage, round_down, override_settings)
    }

    /// Returns true if `sku` has been loaded.
    pub fn is_cached(&self, sku: &str) -> bool {
        self.lock()
            .get(sku)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of loaded products.
    pub fn cached_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    fn slot(&self, sku: &str) -> Slot {
        let mut products = self.lock();
        Arc::clone(products.entry(sku.to_string()).or_default())
    }

    // Drops the slot after a failed load unless another thread has since
    // replaced or filled it.
    fn release(&self, sku: &str, slot: &Slot) {
        let mut products = self.lock();
        let stale = products
            .get(sku)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && current.get().is_none());
        if stale {
            products.remove(sku);
        }
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.lock().len()
    }

    // Slots are inserted whole, so a poisoned map is still consistent.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        self.products.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ProductRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductRegistry")
            .field("cached", &self.cached_count())
            .finish_non_exhaustive()
    }
}
