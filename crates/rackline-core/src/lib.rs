//! # rackline-core: Pure Business Logic for Rackline POS
//!
//! This crate is the **heart** of Rackline POS. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rackline POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 rackline-store (Service Layer)                  │   │
//! │  │   session ──► checkout ──► import ──► reporting                 │   │
//! │  │            InventoryStore trait (async seam)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ rackline-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ │   │
//! │  │   │  types  │ │  money  │ │ pricing │ │ catalog │ │   csv   │ │   │
//! │  │   │ Product │ │  Money  │ │sale math│ │grouping │ │  codec  │ │   │
//! │  │   │  Sale   │ │  cents  │ │  stock  │ │  view   │ │  rows   │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  rackline-db (Database Layer)                   │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Brand, Product, Variant, Sale)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Sale pricing law and stock deduction rule
//! - [`catalog`] - Variant attachment and the nested catalog view
//! - [`csv`] - Product/sales CSV export and the import parser
//! - [`report`] - Sales filter and summary fold
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use rackline_core::money::Money;
//! use rackline_core::pricing::price_sale;
//! use rackline_core::types::SaleType;
//!
//! // Create money from cents (never from floats!)
//! let unit_price = Money::from_cents(1999); // $19.99
//!
//! // Apply the pricing law for a discounted two-unit sale
//! let pricing = price_sale(unit_price, 2, SaleType::Discount, Money::from_cents(500));
//!
//! assert_eq!(pricing.total.cents(), 3498);
//! assert_eq!(pricing.discount.cents(), 500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod csv;
pub mod error;
pub mod money;
pub mod pricing;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rackline_core::Money` instead of
// `use rackline_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use report::{SalesFilter, SalesSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display label for products without a category.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Display label for products without a sub-category.
pub const DEFAULT_SUB_CATEGORY: &str = "General";

/// Display label for variants without a color.
pub const DEFAULT_COLOR: &str = "Default";

/// Brand name used when one cannot be derived from the user's email.
///
/// ## Why a constant?
/// A brand is created lazily on first sign-in, before the user has named
/// it. The email local part is the usual seed; this is the fallback when
/// the email is empty or malformed.
pub const DEFAULT_BRAND_NAME: &str = "My Shop";
