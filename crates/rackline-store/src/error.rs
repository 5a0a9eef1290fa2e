//! # Store Error Types
//!
//! The error surface every [`InventoryStore`](crate::store::InventoryStore)
//! backend and every service speaks. Backend-specific failures (SQLite
//! codes, pool errors) are flattened into [`StoreError::Backend`] at the
//! boundary; callers never match on driver details.

use rackline_core::error::ValidationError;
use thiserror::Error;

/// Errors from store operations and the services built over them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Input failed validation before reaching the backend.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The backend failed. The message carries backend context; the
    /// variant is deliberately opaque.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Not-found error for a product id.
    pub fn product_not_found(id: i64) -> Self {
        StoreError::NotFound {
            entity: "product",
            id: id.to_string(),
        }
    }

    /// Not-found error for a variant id.
    pub fn variant_not_found(id: i64) -> Self {
        StoreError::NotFound {
            entity: "variant",
            id: id.to_string(),
        }
    }

    /// Not-found error for a brand id.
    pub fn brand_not_found(id: i64) -> Self {
        StoreError::NotFound {
            entity: "brand",
            id: id.to_string(),
        }
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
