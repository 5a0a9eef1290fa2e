//! # InventoryStore over SQLite
//!
//! Plugs [`Database`] into the rackline-store seam: each trait method
//! delegates to the matching repository and flattens `DbError` into
//! `StoreError` at the boundary. The services (checkout, import,
//! reporting) run against this implementation exactly as they do against
//! the in-memory store.

use async_trait::async_trait;

use rackline_core::report::SalesFilter;
use rackline_core::types::{
    Brand, Product, ProductDraft, Sale, SaleDraft, Variant, VariantDraft, VariantPatch,
};
use rackline_store::{InventoryStore, StoreResult};

use crate::pool::Database;

#[async_trait]
impl InventoryStore for Database {
    async fn find_brand_by_user(&self, user_id: &str) -> StoreResult<Option<Brand>> {
        Ok(self.brands().find_by_user(user_id).await?)
    }

    async fn insert_brand(&self, user_id: &str, name: &str) -> StoreResult<Brand> {
        Ok(self.brands().insert(user_id, name).await?)
    }

    async fn rename_brand(&self, brand_id: i64, name: &str) -> StoreResult<Brand> {
        Ok(self.brands().rename(brand_id, name).await?)
    }

    async fn list_products(&self, brand_id: i64) -> StoreResult<Vec<Product>> {
        Ok(self.products().list_by_brand(brand_id).await?)
    }

    async fn get_product(&self, product_id: i64) -> StoreResult<Product> {
        Ok(self.products().get(product_id).await?)
    }

    async fn products_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Product>> {
        Ok(self.products().by_ids(ids).await?)
    }

    async fn insert_product(&self, brand_id: i64, draft: &ProductDraft) -> StoreResult<Product> {
        Ok(self.products().insert(brand_id, draft).await?)
    }

    async fn update_product(&self, product_id: i64, draft: &ProductDraft) -> StoreResult<Product> {
        Ok(self.products().update(product_id, draft).await?)
    }

    async fn delete_product(&self, product_id: i64) -> StoreResult<()> {
        Ok(self.products().delete(product_id).await?)
    }

    async fn list_variants(&self, brand_id: i64) -> StoreResult<Vec<Variant>> {
        Ok(self.variants().list_by_brand(brand_id).await?)
    }

    async fn get_variant(&self, variant_id: i64) -> StoreResult<Variant> {
        Ok(self.variants().get(variant_id).await?)
    }

    async fn variants_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Variant>> {
        Ok(self.variants().by_ids(ids).await?)
    }

    async fn insert_variant(&self, draft: &VariantDraft) -> StoreResult<Variant> {
        Ok(self.variants().insert(draft).await?)
    }

    async fn update_variant(&self, variant_id: i64, patch: &VariantPatch) -> StoreResult<Variant> {
        Ok(self.variants().update(variant_id, patch).await?)
    }

    async fn delete_variant(&self, variant_id: i64) -> StoreResult<()> {
        Ok(self.variants().delete(variant_id).await?)
    }

    async fn set_stock(&self, variant_id: i64, stock: i64) -> StoreResult<()> {
        Ok(self.variants().set_stock(variant_id, stock).await?)
    }

    async fn insert_sale(&self, draft: &SaleDraft) -> StoreResult<Sale> {
        Ok(self.sales().insert(draft).await?)
    }

    async fn list_sales(&self, brand_id: i64, filter: &SalesFilter) -> StoreResult<Vec<Sale>> {
        Ok(self.sales().list(brand_id, filter).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
// The services are covered against MemoryStore in rackline-store; these
// tests run the same flows against real SQLite to pin the SQL down.
