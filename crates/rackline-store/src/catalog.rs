//! # Catalog Service
//!
//! Catalog reads and writes over the store seam: loading the full catalog
//! with variants attached, the nested browsing view, the CSV export, and
//! validated create/update entry points.
//!
//! The shaping itself (variant attachment, grouping, CSV) is pure and
//! lives in [`rackline_core`]; this module only fetches and validates.

use tracing::debug;

use rackline_core::catalog::{build_catalog, group_products, GroupedProducts};
use rackline_core::csv::export_products;
use rackline_core::types::{Product, ProductDraft, ProductWithVariants, Variant, VariantDraft};
use rackline_core::validation::{validate_base_name, validate_price_cents, validate_stock};

use crate::error::StoreResult;
use crate::session::Session;
use crate::store::InventoryStore;

/// Loads the session's full catalog: every product with its variants, in
/// category/sub-category/name order.
pub async fn load_catalog(
    store: &dyn InventoryStore,
    session: &Session,
) -> StoreResult<Vec<ProductWithVariants>> {
    let products = store.list_products(session.brand_id()).await?;
    let variants = store.list_variants(session.brand_id()).await?;

    debug!(
        products = products.len(),
        variants = variants.len(),
        "loaded catalog"
    );
    Ok(build_catalog(products, variants))
}

/// Loads the nested category → sub-category → product → color → size view.
pub async fn load_grouped_catalog(
    store: &dyn InventoryStore,
    session: &Session,
) -> StoreResult<GroupedProducts> {
    let catalog = load_catalog(store, session).await?;
    Ok(group_products(&catalog))
}

/// Renders the session's catalog as CSV.
pub async fn export_catalog_csv(
    store: &dyn InventoryStore,
    session: &Session,
) -> StoreResult<String> {
    let catalog = load_catalog(store, session).await?;
    Ok(export_products(&catalog))
}

/// Creates a product after validating its name and price.
pub async fn create_product(
    store: &dyn InventoryStore,
    session: &Session,
    draft: &ProductDraft,
) -> StoreResult<Product> {
    validate_base_name(&draft.base_name)?;
    validate_price_cents(draft.price_cents)?;
    store.insert_product(session.brand_id(), draft).await
}

/// Replaces a product's editable fields after validation.
pub async fn update_product(
    store: &dyn InventoryStore,
    product_id: i64,
    draft: &ProductDraft,
) -> StoreResult<Product> {
    validate_base_name(&draft.base_name)?;
    validate_price_cents(draft.price_cents)?;
    store.update_product(product_id, draft).await
}

/// Creates a variant after validating stock and additional price.
pub async fn create_variant(
    store: &dyn InventoryStore,
    draft: &VariantDraft,
) -> StoreResult<Variant> {
    validate_stock(draft.stock)?;
    validate_price_cents(draft.additional_price_cents)?;
    store.insert_variant(draft).await
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::session::open_session;

    async fn fixture() -> (MemoryStore, Session) {
        let store = MemoryStore::new();
        let session = open_session(&store, "user-1", "shop@example.com")
            .await
            .unwrap();
        (store, session)
    }

    #[tokio::test]
    async fn test_create_validates_before_insert() {
        let (store, session) = fixture().await;

        assert!(create_product(
            &store,
            &session,
            &ProductDraft {
                base_name: "  ".to_string(),
                ..Default::default()
            }
        )
        .await
        .is_err());

        assert!(create_product(
            &store,
            &session,
            &ProductDraft {
                base_name: "Crew Tee".to_string(),
                price_cents: -1,
                ..Default::default()
            }
        )
        .await
        .is_err());

        assert!(store.list_products(session.brand_id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_catalog_attaches_variants() {
        let (store, session) = fixture().await;
        let product = create_product(
            &store,
            &session,
            &ProductDraft {
                category: Some("Tops".to_string()),
                base_name: "Crew Tee".to_string(),
                price_cents: 1999,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        create_variant(
            &store,
            &VariantDraft {
                product_id: product.id,
                color: Some("Black".to_string()),
                size: Some("M".to_string()),
                stock: 4,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let catalog = load_catalog(&store, &session).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].variants.len(), 1);
        assert_eq!(catalog[0].total_stock, 4);

        let grouped = load_grouped_catalog(&store, &session).await.unwrap();
        assert_eq!(grouped.categories[0].category, "Tops");

        let csv = export_catalog_csv(&store, &session).await.unwrap();
        assert!(csv.contains("Crew Tee,Black,M"));
    }
}
