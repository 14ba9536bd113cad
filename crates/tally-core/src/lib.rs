//! # tally-core: Pure Pricing Logic for Tally
//!
//! This crate resolves what a product costs and which settings apply to it
//! when a discount may be in effect. Every function is pure; there is no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             tally-catalog (catalog files, registry)             │   │
//! │  │     catalog.toml ──► ProductRegistry::get(sku) ──► Arc<Product> │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │  product  │  │   │
//! │  │   │  Record   │  │   Money   │  │  engine   │  │  facade   │  │   │
//! │  │   │ Discount  │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CACHING • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `ProductRecord`, `DiscountRecord`, `SettingValue`, `Percentage`
//! - [`money`] - Money type with decimal arithmetic (no floating point!)
//! - [`pricing`] - Effective price, discount dollars, setting precedence
//! - [`product`] - The `Product` facade
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use tally_core::{DiscountRecord, Money, Percentage, Product, ProductRecord, Settings};
//!
//! let record = ProductRecord::new(
//!     "JACKET",
//!     "Rain Jacket",
//!     Money::from_decimal(dec!(149.99)),
//!     vec!["outerwear".to_string()],
//!     Settings::new(),
//! );
//! let discount = DiscountRecord::new(Percentage::new(dec!(0.5)), true, Settings::new());
//! let product = Product::new(record, Some(discount));
//!
//! // $149.99 - $0.75 = $149.24, rounded down to $149.00
//! assert_eq!(product.current_price().to_string(), "$149.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod product;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use product::{Product, ProductSummary};
pub use types::*;
