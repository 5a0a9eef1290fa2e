//! # Repository Layer
//!
//! One repository per table. Each wraps the shared pool, owns the SQL for
//! its table and returns domain types from `rackline-core` directly
//! (the structs derive `FromRow` behind the `sqlx` feature).
//!
//! Queries use the runtime API with explicit column lists; batched id
//! lookups and the dynamic sales filter are built with `QueryBuilder`.

pub mod brand;
pub mod product;
pub mod sale;
pub mod variant;
