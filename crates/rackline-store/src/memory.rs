//! # In-Memory Store
//!
//! A [`InventoryStore`] backend over plain hash maps behind a tokio mutex.
//! Exists so the services (and their tests) run without a database; the
//! SQLite backend must observe the same contracts this one does.
//!
//! Ordering matches SQLite: catalog listings sort `None` labels first
//! (NULLs first), sales list newest-first.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use rackline_core::report::SalesFilter;
use rackline_core::types::{
    Brand, Product, ProductDraft, Sale, SaleDraft, Variant, VariantDraft, VariantPatch,
};

use crate::error::{StoreError, StoreResult};
use crate::store::InventoryStore;

// =============================================================================
// Store
// =============================================================================

/// Hash-map backed store. Cheap to create per test; clones share nothing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    brands: HashMap<i64, Brand>,
    products: HashMap<i64, Product>,
    variants: HashMap<i64, Variant>,
    sales: Vec<Sale>,
    next_id: i64,
}

impl Inner {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn brand_of_product(&self, product_id: i64) -> Option<i64> {
        self.products.get(&product_id).map(|p| p.brand_id)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// InventoryStore Implementation
// =============================================================================

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn find_brand_by_user(&self, user_id: &str) -> StoreResult<Option<Brand>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .brands
            .values()
            .find(|b| b.user_id == user_id)
            .cloned())
    }

    async fn insert_brand(&self, user_id: &str, name: &str) -> StoreResult<Brand> {
        let mut inner = self.inner.lock().await;

        // Mirrors the UNIQUE(user_id) constraint of the SQLite schema.
        if inner.brands.values().any(|b| b.user_id == user_id) {
            return Err(StoreError::Backend(format!(
                "brand already exists for user {user_id}"
            )));
        }

        let brand = Brand {
            id: inner.allocate_id(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        inner.brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    async fn rename_brand(&self, brand_id: i64, name: &str) -> StoreResult<Brand> {
        let mut inner = self.inner.lock().await;
        let brand = inner
            .brands
            .get_mut(&brand_id)
            .ok_or_else(|| StoreError::brand_not_found(brand_id))?;
        brand.name = name.to_string();
        Ok(brand.clone())
    }

    async fn list_products(&self, brand_id: i64) -> StoreResult<Vec<Product>> {
        let inner = self.inner.lock().await;
        let mut products: Vec<Product> = inner
            .products
            .values()
            .filter(|p| p.brand_id == brand_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| {
            (&a.category, &a.sub_category, &a.base_name)
                .cmp(&(&b.category, &b.sub_category, &b.base_name))
        });
        Ok(products)
    }

    async fn get_product(&self, product_id: i64) -> StoreResult<Product> {
        let inner = self.inner.lock().await;
        inner
            .products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| StoreError::product_not_found(product_id))
    }

    async fn products_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Product>> {
        let inner = self.inner.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.products.get(id).cloned())
            .collect())
    }

    async fn insert_product(&self, brand_id: i64, draft: &ProductDraft) -> StoreResult<Product> {
        let mut inner = self.inner.lock().await;
        if !inner.brands.contains_key(&brand_id) {
            return Err(StoreError::brand_not_found(brand_id));
        }

        let product = Product {
            id: inner.allocate_id(),
            brand_id,
            category: draft.category.clone(),
            sub_category: draft.sub_category.clone(),
            base_name: draft.base_name.clone(),
            description: draft.description.clone(),
            price_cents: draft.price_cents,
            created_at: Utc::now(),
        };
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, product_id: i64, draft: &ProductDraft) -> StoreResult<Product> {
        let mut inner = self.inner.lock().await;
        let product = inner
            .products
            .get_mut(&product_id)
            .ok_or_else(|| StoreError::product_not_found(product_id))?;

        product.category = draft.category.clone();
        product.sub_category = draft.sub_category.clone();
        product.base_name = draft.base_name.clone();
        product.description = draft.description.clone();
        product.price_cents = draft.price_cents;
        Ok(product.clone())
    }

    async fn delete_product(&self, product_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.products.remove(&product_id).is_none() {
            return Err(StoreError::product_not_found(product_id));
        }

        // Cascade to variants; sale references are cleared, never deleted.
        let doomed: Vec<i64> = inner
            .variants
            .values()
            .filter(|v| v.product_id == product_id)
            .map(|v| v.id)
            .collect();
        for id in &doomed {
            inner.variants.remove(id);
        }
        for sale in inner.sales.iter_mut() {
            if sale.product_id == Some(product_id) {
                sale.product_id = None;
            }
            if let Some(vid) = sale.product_variant_id {
                if doomed.contains(&vid) {
                    sale.product_variant_id = None;
                }
            }
        }
        Ok(())
    }

    async fn list_variants(&self, brand_id: i64) -> StoreResult<Vec<Variant>> {
        let inner = self.inner.lock().await;
        let mut variants: Vec<Variant> = inner
            .variants
            .values()
            .filter(|v| inner.brand_of_product(v.product_id) == Some(brand_id))
            .cloned()
            .collect();
        variants.sort_by_key(|v| v.id);
        Ok(variants)
    }

    async fn get_variant(&self, variant_id: i64) -> StoreResult<Variant> {
        let inner = self.inner.lock().await;
        inner
            .variants
            .get(&variant_id)
            .cloned()
            .ok_or_else(|| StoreError::variant_not_found(variant_id))
    }

    async fn variants_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Variant>> {
        let inner = self.inner.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.variants.get(id).cloned())
            .collect())
    }

    async fn insert_variant(&self, draft: &VariantDraft) -> StoreResult<Variant> {
        let mut inner = self.inner.lock().await;
        if !inner.products.contains_key(&draft.product_id) {
            return Err(StoreError::product_not_found(draft.product_id));
        }

        let variant = Variant {
            id: inner.allocate_id(),
            product_id: draft.product_id,
            color: draft.color.clone(),
            size: draft.size.clone(),
            sku: draft.sku.clone(),
            barcode: draft.barcode.clone(),
            stock: draft.stock,
            additional_price_cents: draft.additional_price_cents,
            created_at: Utc::now(),
        };
        inner.variants.insert(variant.id, variant.clone());
        Ok(variant)
    }

    async fn update_variant(&self, variant_id: i64, patch: &VariantPatch) -> StoreResult<Variant> {
        let mut inner = self.inner.lock().await;
        let variant = inner
            .variants
            .get_mut(&variant_id)
            .ok_or_else(|| StoreError::variant_not_found(variant_id))?;

        variant.sku = patch.sku.clone();
        variant.barcode = patch.barcode.clone();
        variant.stock = patch.stock;
        variant.additional_price_cents = patch.additional_price_cents;
        Ok(variant.clone())
    }

    async fn delete_variant(&self, variant_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.variants.remove(&variant_id).is_none() {
            return Err(StoreError::variant_not_found(variant_id));
        }
        for sale in inner.sales.iter_mut() {
            if sale.product_variant_id == Some(variant_id) {
                sale.product_variant_id = None;
            }
        }
        Ok(())
    }

    async fn set_stock(&self, variant_id: i64, stock: i64) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let variant = inner
            .variants
            .get_mut(&variant_id)
            .ok_or_else(|| StoreError::variant_not_found(variant_id))?;
        variant.stock = stock;
        Ok(())
    }

    async fn insert_sale(&self, draft: &SaleDraft) -> StoreResult<Sale> {
        let mut inner = self.inner.lock().await;
        let sale = Sale {
            id: inner.allocate_id(),
            brand_id: draft.brand_id,
            product_id: draft.product_id,
            product_variant_id: draft.product_variant_id,
            quantity: draft.quantity,
            sale_type: draft.sale_type,
            discount_cents: draft.discount_cents,
            total_cents: draft.total_cents,
            note: draft.note.clone(),
            created_at: Utc::now(),
        };
        inner.sales.push(sale.clone());
        Ok(sale)
    }

    async fn list_sales(&self, brand_id: i64, filter: &SalesFilter) -> StoreResult<Vec<Sale>> {
        let inner = self.inner.lock().await;
        let mut sales: Vec<Sale> = inner
            .sales
            .iter()
            .filter(|s| s.brand_id == brand_id && filter.matches_sale(s))
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
