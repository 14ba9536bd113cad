//! # tally-catalog: Catalog Loading and Product Registry
//!
//! Turns catalog files into cached [`Product`](tally_core::Product) facades.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product Lookup                                   │
//! │                                                                         │
//! │  registry.get("test")                                                   │
//! │       │                                                                 │
//! │       ▼  (cache miss only)                                              │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  tally-catalog (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CatalogConfig │    │ ConfigSource  │    │  SaleBook    │  │   │
//! │  │   │ (config.rs)   │───►│ (source.rs)   │───►│  (sale.rs)   │  │   │
//! │  │   │ catalog.toml  │    │ entry → record│    │ tags → disc. │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                               │                                 │   │
//! │  │                               ▼                                 │   │
//! │  │                  ProductRegistry (registry.rs)                  │   │
//! │  │                  one Arc<Product> per SKU                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Catalog file format and loading
//! - [`sale`] - Sale lookup (tags → discount)
//! - [`source`] - `ProductSource` seam used by the registry
//! - [`registry`] - `ProductRegistry`
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tally_catalog::ProductRegistry;
//!
//! // Explicit path, else $TALLY_CATALOG, else the platform default
//! let registry = ProductRegistry::load(None)?;
//! let product = registry.get("test")?;
//! println!("{} {}", product.name(), product.current_price());
//! # Ok::<(), tally_catalog::CatalogError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod registry;
pub mod sale;
pub mod source;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{CatalogConfig, DiscountEntry, ProductEntry, SaleEntry};
pub use error::{CatalogError, CatalogResult};
pub use registry::ProductRegistry;
pub use sale::{SaleBook, SaleLookup};
pub use source::{ConfigSource, LoadedProduct, ProductSource};
