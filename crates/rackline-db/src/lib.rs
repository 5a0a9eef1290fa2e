//! # rackline-db: Database Layer for Rackline POS
//!
//! This crate provides database access for the Rackline POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rackline POS Data Flow                            │
//! │                                                                         │
//! │  rackline-store service (checkout, import, reporting)                   │
//! │       │ via the InventoryStore trait                                    │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   rackline-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │ (brand, sale, │    │  (embedded)  │   │   │
//! │  │   │               │    │  product,     │    │              │   │   │
//! │  │   │ SqlitePool    │◄───│  variant)     │    │ 001_init.sql │   │   │
//! │  │   │ Management    │    │               │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │                      SQLite Database (rackline.db)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (brand, product, variant, sale)
//! - [`store_impl`] - `InventoryStore` implementation over the pool
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rackline_db::{Database, DbConfig};
//! use rackline_store::session::open_session;
//!
//! let db = Database::new(DbConfig::new("path/to/rackline.db")).await?;
//!
//! // The handle implements InventoryStore, so services take it directly
//! let session = open_session(&db, "user-1", "shop@example.com").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store_impl;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::brand::BrandRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::variant::VariantRepository;
