//! # rackline-store: Store Seam + Composite Services
//!
//! The async boundary of Rackline POS and everything built directly on it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   ★ rackline-store (THIS CRATE) ★                       │
//! │                                                                         │
//! │  ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌───────────┐ ┌─────────┐        │
//! │  │ session │ │ checkout │ │ import  │ │ reporting │ │ catalog │        │
//! │  │  brand  │ │   sale   │ │  CSV    │ │  filter + │ │  CRUD + │        │
//! │  │ bootstrap│ │  txn    │ │reconcile│ │  summary  │ │  export │        │
//! │  └────┬────┘ └────┬─────┘ └────┬────┘ └─────┬─────┘ └────┬────┘        │
//! │       └───────────┴────────────┼────────────┴────────────┘             │
//! │                                ▼                                        │
//! │                 InventoryStore trait (async seam)                       │
//! │                      ┌─────────┴──────────┐                             │
//! │                      ▼                    ▼                             │
//! │                 MemoryStore          rackline-db                        │
//! │               (tests, no I/O)       (SQLite, sqlx)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The [`InventoryStore`](store::InventoryStore) trait
//! - [`session`] - Session bootstrap and lazy brand creation
//! - [`checkout`] - The sale transaction
//! - [`import`] - The CSV import reconciler
//! - [`reporting`] - Filtered history, summaries, sales export
//! - [`catalog`] - Catalog loading, grouping, export and validated CRUD
//! - [`memory`] - Hash-map backend for tests and examples
//! - [`error`] - The store error surface
//!
//! Services take `&dyn InventoryStore` plus a [`session::Session`], so
//! brand scoping is always explicit and any backend can be swapped in.

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod import;
pub mod memory;
pub mod reporting;
pub mod session;
pub mod store;

pub use checkout::SaleRequest;
pub use error::{StoreError, StoreResult};
pub use import::ImportOutcome;
pub use memory::MemoryStore;
pub use session::Session;
pub use store::InventoryStore;
