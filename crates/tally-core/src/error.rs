//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                          │
//! │  └── CoreError        - Domain lookups that the caller made strict      │
//! │                                                                         │
//! │  tally-catalog errors (separate crate)                                  │
//! │  └── CatalogError     - Missing SKUs, unreadable catalog files          │
//! │                                                                         │
//! │  Flow: CoreError → CatalogError → quote binary (exit status 1)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Price arithmetic is total over well-formed decimals, so it has no error
//! variants. A missing setting is normally an `Option::None`; `CoreError`
//! only appears when a caller asks for the strict form.

use thiserror::Error;

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Neither the product nor its discount defines the setting.
    ///
    /// ## When This Occurs
    /// - `Product::require_setting` with a key absent from both records
    #[error("Setting '{key}' not found for product {sku}")]
    MissingSetting { sku: String, key: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
