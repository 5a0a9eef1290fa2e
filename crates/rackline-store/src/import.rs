//! # Catalog Import Reconciler
//!
//! Reconciles a product CSV against the brand's existing catalog: rows are
//! grouped into products, products are matched by their
//! (category, sub_category, base_name) identity against a snapshot taken
//! at the start, and each variant row is matched by (color, size) within
//! its product.
//!
//! ## Reconciliation Rules
//! - A matched product is never updated: its category, name, description
//!   and price stay as they are. Import only creates products.
//! - A matched variant has sku, barcode, stock and additional price
//!   overwritten from the row; color and size are identity, never patched.
//! - An unmatched variant row is inserted.
//! - A row with neither color nor size is a product-only row: it can cause
//!   the product to exist but carries no variant to reconcile.
//!
//! The run is best-effort: a failing row (or a failing product creation,
//! which skips its whole group) is logged and the run continues. Counts in
//! the outcome reflect operations that actually succeeded.
//!
//! The snapshot is taken once; rows duplicated within one file reconcile
//! against the same pre-import state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rackline_core::csv::{parse_product_rows, ProductRow};
use rackline_core::types::{ProductDraft, VariantDraft, VariantPatch};

use crate::error::StoreResult;
use crate::session::Session;
use crate::store::InventoryStore;

// =============================================================================
// Outcome
// =============================================================================

/// Counts of what an import run actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub products_created: usize,
    pub variants_created: usize,
    pub variants_updated: usize,
    /// Rows that produced no variant operation: missing base name,
    /// product-only rows, and rows lost to a failed operation.
    pub rows_skipped: usize,
}

// =============================================================================
// Reconciler
// =============================================================================

/// Imports a product CSV into the session's catalog.
///
/// Empty or header-only input is a successful no-op. Backend errors while
/// taking the initial snapshot abort the run; everything after that is
/// best-effort per row.
pub async fn import_catalog(
    store: &dyn InventoryStore,
    session: &Session,
    csv_text: &str,
) -> StoreResult<ImportOutcome> {
    let rows = parse_product_rows(csv_text);
    let mut outcome = ImportOutcome::default();
    if rows.is_empty() {
        return Ok(outcome);
    }

    let brand_id = session.brand_id();
    let products = store.list_products(brand_id).await?;
    let variants = store.list_variants(brand_id).await?;

    // Snapshot indexes. Variant lists stay as taken: duplicate rows within
    // one file see the same pre-import state.
    let mut product_ids: HashMap<ProductKey, i64> = products
        .iter()
        .map(|p| {
            (
                ProductKey::new(
                    p.category.as_deref().unwrap_or(""),
                    p.sub_category.as_deref().unwrap_or(""),
                    &p.base_name,
                ),
                p.id,
            )
        })
        .collect();
    let variant_index: HashMap<(i64, VariantKey), i64> = variants
        .iter()
        .map(|v| {
            (
                (
                    v.product_id,
                    VariantKey::new(v.color.as_deref().unwrap_or(""), v.size.as_deref().unwrap_or("")),
                ),
                v.id,
            )
        })
        .collect();

    for (key, group) in group_rows(rows, &mut outcome) {
        let product_id = match product_ids.get(&key) {
            Some(id) => *id,
            None => {
                let first = &group[0];
                let draft = ProductDraft {
                    category: optional(&first.category),
                    sub_category: optional(&first.sub_category),
                    base_name: first.base_name.clone(),
                    description: None,
                    price_cents: first.price_cents(),
                };
                match store.insert_product(brand_id, &draft).await {
                    Ok(product) => {
                        outcome.products_created += 1;
                        product_ids.insert(key.clone(), product.id);
                        product.id
                    }
                    Err(err) => {
                        warn!(base_name = %first.base_name, %err, "skipping group, product creation failed");
                        outcome.rows_skipped += group.len();
                        continue;
                    }
                }
            }
        };

        for row in &group {
            if row.is_product_only() {
                outcome.rows_skipped += 1;
                continue;
            }

            let variant_key = VariantKey::new(&row.color, &row.size);
            match variant_index.get(&(product_id, variant_key)) {
                Some(&variant_id) => {
                    let patch = VariantPatch {
                        sku: optional(&row.sku),
                        barcode: optional(&row.barcode),
                        stock: row.stock_count(),
                        additional_price_cents: row.additional_price_cents(),
                    };
                    match store.update_variant(variant_id, &patch).await {
                        Ok(_) => outcome.variants_updated += 1,
                        Err(err) => {
                            warn!(variant_id, %err, "variant update failed");
                            outcome.rows_skipped += 1;
                        }
                    }
                }
                None => {
                    let draft = VariantDraft {
                        product_id,
                        color: optional(&row.color),
                        size: optional(&row.size),
                        sku: optional(&row.sku),
                        barcode: optional(&row.barcode),
                        stock: row.stock_count(),
                        additional_price_cents: row.additional_price_cents(),
                    };
                    match store.insert_variant(&draft).await {
                        Ok(_) => outcome.variants_created += 1,
                        Err(err) => {
                            warn!(product_id, %err, "variant creation failed");
                            outcome.rows_skipped += 1;
                        }
                    }
                }
            }
        }
    }

    debug!(
        products_created = outcome.products_created,
        variants_created = outcome.variants_created,
        variants_updated = outcome.variants_updated,
        rows_skipped = outcome.rows_skipped,
        "import finished"
    );
    Ok(outcome)
}

/// Product identity within a brand. Absent labels and empty strings are
/// the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ProductKey {
    category: String,
    sub_category: String,
    base_name: String,
}

impl ProductKey {
    fn new(category: &str, sub_category: &str, base_name: &str) -> Self {
        ProductKey {
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            base_name: base_name.to_string(),
        }
    }
}

/// Variant identity within a product. Absent color/size and empty cells
/// are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct VariantKey {
    color: String,
    size: String,
}

impl VariantKey {
    fn new(color: &str, size: &str) -> Self {
        VariantKey {
            color: color.to_string(),
            size: size.to_string(),
        }
    }
}

/// Groups rows by product identity, preserving first-seen group order and
/// row order within each group. Rows without a base name are dropped and
/// counted as skipped.
fn group_rows(rows: Vec<ProductRow>, outcome: &mut ImportOutcome) -> Vec<(ProductKey, Vec<ProductRow>)> {
    let mut groups: Vec<(ProductKey, Vec<ProductRow>)> = Vec::new();

    for row in rows {
        if row.base_name.is_empty() {
            outcome.rows_skipped += 1;
            continue;
        }

        let key = ProductKey::new(&row.category, &row.sub_category, &row.base_name);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(row),
            None => groups.push((key, vec![row])),
        }
    }

    groups
}

/// Empty CSV cell → absent field.
fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::session::open_session;

    const HEADER: &str =
        "category,sub_category,base_name,color,size,sku,barcode,price,additional_price,stock";

    async fn fixture() -> (MemoryStore, Session) {
        let store = MemoryStore::new();
        let session = open_session(&store, "user-1", "shop@example.com")
            .await
            .unwrap();
        (store, session)
    }

    #[tokio::test]
    async fn test_import_creates_products_and_variants() {
        let (store, session) = fixture().await;
        let csv = format!(
            "{HEADER}\n\
             Tops,Tee,Crew Tee,Black,M,SKU-1,,19.99,0.00,4\n\
             Tops,Tee,Crew Tee,Black,L,SKU-2,,19.99,1.50,2\n\
             Shoes,,Runner,White,42,,,59.00,0.00,1"
        );

        let outcome = import_catalog(&store, &session, &csv).await.unwrap();
        assert_eq!(outcome.products_created, 2);
        assert_eq!(outcome.variants_created, 3);
        assert_eq!(outcome.variants_updated, 0);
        assert_eq!(outcome.rows_skipped, 0);

        let products = store.list_products(session.brand_id()).await.unwrap();
        assert_eq!(products.len(), 2);
        let tee = products.iter().find(|p| p.base_name == "Crew Tee").unwrap();
        assert_eq!(tee.category.as_deref(), Some("Tops"));
        assert_eq!(tee.price_cents, 1999);
        let runner = products.iter().find(|p| p.base_name == "Runner").unwrap();
        assert_eq!(runner.sub_category, None);
    }

    #[tokio::test]
    async fn test_reimport_updates_variants_without_touching_products() {
        let (store, session) = fixture().await;
        let csv = format!(
            "{HEADER}\n\
             Tops,Tee,Crew Tee,Black,M,SKU-1,,19.99,0.00,4"
        );
        import_catalog(&store, &session, &csv).await.unwrap();

        // Same identity, new price/stock/sku.
        let csv = format!(
            "{HEADER}\n\
             Tops,Tee,Crew Tee,Black,M,SKU-9,123456,25.00,2.00,9"
        );
        let outcome = import_catalog(&store, &session, &csv).await.unwrap();
        assert_eq!(outcome.products_created, 0);
        assert_eq!(outcome.variants_created, 0);
        assert_eq!(outcome.variants_updated, 1);

        let products = store.list_products(session.brand_id()).await.unwrap();
        assert_eq!(products.len(), 1);
        // Product price is never updated by import.
        assert_eq!(products[0].price_cents, 1999);

        let variants = store.list_variants(session.brand_id()).await.unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].stock, 9);
        assert_eq!(variants[0].sku.as_deref(), Some("SKU-9"));
        assert_eq!(variants[0].barcode.as_deref(), Some("123456"));
        assert_eq!(variants[0].additional_price_cents, 200);
        // Identity unchanged.
        assert_eq!(variants[0].color.as_deref(), Some("Black"));
    }

    #[tokio::test]
    async fn test_new_variant_of_existing_product() {
        let (store, session) = fixture().await;
        let csv = format!("{HEADER}\nTops,Tee,Crew Tee,Black,M,,,19.99,0.00,4");
        import_catalog(&store, &session, &csv).await.unwrap();

        let csv = format!("{HEADER}\nTops,Tee,Crew Tee,White,M,,,19.99,0.00,2");
        let outcome = import_catalog(&store, &session, &csv).await.unwrap();
        assert_eq!(outcome.products_created, 0);
        assert_eq!(outcome.variants_created, 1);

        let variants = store.list_variants(session.brand_id()).await.unwrap();
        assert_eq!(variants.len(), 2);
    }

    #[tokio::test]
    async fn test_product_only_and_nameless_rows_are_skipped() {
        let (store, session) = fixture().await;
        let csv = format!(
            "{HEADER}\n\
             Tops,Tee,Crew Tee,,,,,19.99,0.00,0\n\
             Tops,Tee,,Black,M,,,19.99,0.00,4"
        );

        let outcome = import_catalog(&store, &session, &csv).await.unwrap();
        // The product-only row still creates its product.
        assert_eq!(outcome.products_created, 1);
        assert_eq!(outcome.variants_created, 0);
        assert_eq!(outcome.rows_skipped, 2);
    }

    #[tokio::test]
    async fn test_empty_input_is_a_no_op() {
        let (store, session) = fixture().await;
        assert_eq!(
            import_catalog(&store, &session, "").await.unwrap(),
            ImportOutcome::default()
        );
        assert_eq!(
            import_catalog(&store, &session, HEADER).await.unwrap(),
            ImportOutcome::default()
        );
    }

    #[tokio::test]
    async fn test_invalid_numbers_fall_back_to_zero() {
        let (store, session) = fixture().await;
        let csv = format!("{HEADER}\nTops,Tee,Crew Tee,Black,M,,,not-a-price,x,y");

        let outcome = import_catalog(&store, &session, &csv).await.unwrap();
        assert_eq!(outcome.variants_created, 1);

        let products = store.list_products(session.brand_id()).await.unwrap();
        assert_eq!(products[0].price_cents, 0);
        let variants = store.list_variants(session.brand_id()).await.unwrap();
        assert_eq!(variants[0].stock, 0);
        assert_eq!(variants[0].additional_price_cents, 0);
    }

    #[tokio::test]
    async fn test_absent_labels_match_empty_cells() {
        let (store, session) = fixture().await;
        // Created through the API with no category at all.
        store
            .insert_product(
                session.brand_id(),
                &ProductDraft {
                    category: None,
                    sub_category: None,
                    base_name: "Runner".to_string(),
                    description: None,
                    price_cents: 5900,
                },
            )
            .await
            .unwrap();

        let csv = format!("{HEADER}\n,,Runner,White,42,,,59.00,0.00,1");
        let outcome = import_catalog(&store, &session, &csv).await.unwrap();

        // Empty cells reconcile against the None-labelled product.
        assert_eq!(outcome.products_created, 0);
        assert_eq!(outcome.variants_created, 1);
    }
}
