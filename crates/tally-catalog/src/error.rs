//! # Catalog Error Types
//!
//! Error types for catalog loading and registry lookups.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / toml / serde_json                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds context and categorization           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRegistry::get() caller (never retried internally)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tally_core::CoreError;
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Entity not found in the catalog.
    ///
    /// ## When This Occurs
    /// - `ProductRegistry::get` with a SKU the catalog has no entry for
    /// - A product entry names a sale that is not defined
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid TOML or JSON for the catalog shape.
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    /// Catalog parsed but is internally inconsistent.
    #[error("Invalid catalog: {0}")]
    InvalidConfig(String),

    /// Domain error (wraps CoreError).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CatalogError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Returns true for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
