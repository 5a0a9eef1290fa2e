//! # The Store Seam
//!
//! [`InventoryStore`] is the single async boundary between business logic
//! and persistence. Services receive `&dyn InventoryStore` (or a generic
//! bound) and never touch a backend directly, so every composite operation
//! is testable against [`MemoryStore`](crate::memory::MemoryStore) and runs
//! unchanged against SQLite.
//!
//! ## Contract Notes
//! - Catalog listings are ordered by category, sub-category, base name
//!   ascending; sales listings newest-first.
//! - `list_sales` applies only the store-level half of the filter (date
//!   range, sale type, product id). The category filter needs the product
//!   join and is applied by the reporting service.
//! - Batched `*_by_ids` lookups return whatever exists; missing ids are
//!   simply absent from the result, not errors.

use async_trait::async_trait;

use rackline_core::report::SalesFilter;
use rackline_core::types::{
    Brand, Product, ProductDraft, Sale, SaleDraft, Variant, VariantDraft, VariantPatch,
};

use crate::error::StoreResult;

/// Persistence operations for the whole domain: brands, products,
/// variants and sales.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    // =========================================================================
    // Brands
    // =========================================================================

    /// Looks up the brand owned by a user, if one exists.
    async fn find_brand_by_user(&self, user_id: &str) -> StoreResult<Option<Brand>>;

    /// Creates a brand for a user. The caller guarantees the user has none.
    async fn insert_brand(&self, user_id: &str, name: &str) -> StoreResult<Brand>;

    /// Renames a brand, returning the updated row.
    async fn rename_brand(&self, brand_id: i64, name: &str) -> StoreResult<Brand>;

    // =========================================================================
    // Products
    // =========================================================================

    /// Lists a brand's products ordered by category, sub-category and base
    /// name ascending.
    async fn list_products(&self, brand_id: i64) -> StoreResult<Vec<Product>>;

    /// Fetches a single product.
    async fn get_product(&self, product_id: i64) -> StoreResult<Product>;

    /// Fetches the products with the given ids; missing ids are omitted.
    async fn products_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Product>>;

    /// Creates a product under a brand.
    async fn insert_product(&self, brand_id: i64, draft: &ProductDraft) -> StoreResult<Product>;

    /// Replaces a product's editable fields.
    async fn update_product(&self, product_id: i64, draft: &ProductDraft) -> StoreResult<Product>;

    /// Deletes a product and, by cascade, its variants. Sales referencing
    /// it keep their rows with the reference cleared.
    async fn delete_product(&self, product_id: i64) -> StoreResult<()>;

    // =========================================================================
    // Variants
    // =========================================================================

    /// Lists every variant under a brand's products.
    async fn list_variants(&self, brand_id: i64) -> StoreResult<Vec<Variant>>;

    /// Fetches a single variant.
    async fn get_variant(&self, variant_id: i64) -> StoreResult<Variant>;

    /// Fetches the variants with the given ids; missing ids are omitted.
    async fn variants_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Variant>>;

    /// Creates a variant under a product.
    async fn insert_variant(&self, draft: &VariantDraft) -> StoreResult<Variant>;

    /// Overwrites a variant's non-identity fields (sku, barcode, stock,
    /// additional price). Color and size are never patched.
    async fn update_variant(&self, variant_id: i64, patch: &VariantPatch) -> StoreResult<Variant>;

    /// Deletes a variant. Sales referencing it keep their rows with the
    /// reference cleared.
    async fn delete_variant(&self, variant_id: i64) -> StoreResult<()>;

    /// Sets a variant's stock to an absolute value.
    async fn set_stock(&self, variant_id: i64, stock: i64) -> StoreResult<()>;

    // =========================================================================
    // Sales
    // =========================================================================

    /// Appends a sale record. Sales are immutable once inserted.
    async fn insert_sale(&self, draft: &SaleDraft) -> StoreResult<Sale>;

    /// Lists a brand's sales newest-first, applying the store-level half of
    /// the filter (date range, sale type, product id).
    async fn list_sales(&self, brand_id: i64, filter: &SalesFilter) -> StoreResult<Vec<Sale>>;
}
