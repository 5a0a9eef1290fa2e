//! # Sales Reporting Service
//!
//! Fetches filtered sales history with product/variant details joined in,
//! folds it into summaries and renders the sales CSV export.
//!
//! The store applies the date/type/product half of the filter while
//! listing; this service joins products and variants by batched id lookup
//! and then applies the category half, which only exists on the joined
//! product.

use tracing::debug;

use rackline_core::csv::export_sales;
use rackline_core::report::{matches_category, summarize, SalesFilter, SalesSummary};
use rackline_core::types::{Product, SaleWithDetails, Variant};

use crate::error::StoreResult;
use crate::session::Session;
use crate::store::InventoryStore;

/// Fetches the session's sales matching the filter, newest first, with
/// product and variant details attached where the references still resolve.
pub async fn fetch_sales(
    store: &dyn InventoryStore,
    session: &Session,
    filter: &SalesFilter,
) -> StoreResult<Vec<SaleWithDetails>> {
    let sales = store.list_sales(session.brand_id(), filter).await?;

    let product_ids = dedup_ids(sales.iter().filter_map(|s| s.product_id));
    let variant_ids = dedup_ids(sales.iter().filter_map(|s| s.product_variant_id));

    let products = store.products_by_ids(&product_ids).await?;
    let variants = store.variants_by_ids(&variant_ids).await?;

    let details: Vec<SaleWithDetails> = sales
        .into_iter()
        .map(|sale| {
            let product = sale
                .product_id
                .and_then(|id| find_product(&products, id));
            let variant = sale
                .product_variant_id
                .and_then(|id| find_variant(&variants, id));
            SaleWithDetails {
                sale,
                product,
                variant,
            }
        })
        .filter(|detail| matches_category(filter, detail))
        .collect();

    debug!(count = details.len(), "fetched sales history");
    Ok(details)
}

/// Fetches and summarizes the session's sales matching the filter.
pub async fn sales_summary(
    store: &dyn InventoryStore,
    session: &Session,
    filter: &SalesFilter,
) -> StoreResult<SalesSummary> {
    let details = fetch_sales(store, session, filter).await?;
    let sales: Vec<_> = details.into_iter().map(|d| d.sale).collect();
    Ok(summarize(&sales))
}

/// Renders the filtered sales history as CSV.
pub async fn export_sales_csv(
    store: &dyn InventoryStore,
    session: &Session,
    filter: &SalesFilter,
) -> StoreResult<String> {
    let details = fetch_sales(store, session, filter).await?;
    Ok(export_sales(&details))
}

fn dedup_ids(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn find_product(products: &[Product], id: i64) -> Option<Product> {
    products.iter().find(|p| p.id == id).cloned()
}

fn find_variant(variants: &[Variant], id: i64) -> Option<Variant> {
    variants.iter().find(|v| v.id == id).cloned()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{record_sale, SaleRequest};
    use crate::memory::MemoryStore;
    use crate::session::open_session;
    use rackline_core::types::{ProductDraft, SaleType, VariantDraft};

    async fn fixture() -> (MemoryStore, Session) {
        let store = MemoryStore::new();
        let session = open_session(&store, "user-1", "shop@example.com")
            .await
            .unwrap();

        for (category, name, price) in [("Tops", "Crew Tee", 1000), ("Shoes", "Runner", 5900)] {
            let product = store
                .insert_product(
                    session.brand_id(),
                    &ProductDraft {
                        category: Some(category.to_string()),
                        base_name: name.to_string(),
                        price_cents: price,
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            let variant = store
                .insert_variant(&VariantDraft {
                    product_id: product.id,
                    color: Some("Black".to_string()),
                    size: Some("M".to_string()),
                    stock: 10,
                    ..Default::default()
                })
                .await
                .unwrap();
            record_sale(
                &store,
                &session,
                SaleRequest {
                    variant_id: variant.id,
                    quantity: 1,
                    sale_type: SaleType::Normal,
                    discount_cents: 0,
                    note: None,
                },
            )
            .await
            .unwrap();
        }

        (store, session)
    }

    #[tokio::test]
    async fn test_fetch_joins_details() {
        let (store, session) = fixture().await;

        let details = fetch_sales(&store, &session, &SalesFilter::default())
            .await
            .unwrap();
        assert_eq!(details.len(), 2);
        for detail in &details {
            assert!(detail.product.is_some());
            assert!(detail.variant.is_some());
        }
    }

    #[tokio::test]
    async fn test_category_filter_applies_after_join() {
        let (store, session) = fixture().await;

        let filter = SalesFilter {
            category: Some("Tops".to_string()),
            ..Default::default()
        };
        let details = fetch_sales(&store, &session, &filter).await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(
            details[0].product.as_ref().unwrap().base_name,
            "Crew Tee"
        );
    }

    #[tokio::test]
    async fn test_deleted_product_leaves_sale_visible() {
        let (store, session) = fixture().await;
        let products = store.list_products(session.brand_id()).await.unwrap();
        let tee = products.iter().find(|p| p.base_name == "Crew Tee").unwrap();
        store.delete_product(tee.id).await.unwrap();

        let details = fetch_sales(&store, &session, &SalesFilter::default())
            .await
            .unwrap();
        assert_eq!(details.len(), 2);
        let orphan = details.iter().find(|d| d.product.is_none()).unwrap();
        assert!(orphan.variant.is_none());

        // And the orphan renders as "Unknown" in the export.
        let csv = export_sales_csv(&store, &session, &SalesFilter::default())
            .await
            .unwrap();
        assert!(csv.contains("Unknown"));
    }

    #[tokio::test]
    async fn test_summary_over_filtered_sales() {
        let (store, session) = fixture().await;

        let summary = sales_summary(&store, &session, &SalesFilter::default())
            .await
            .unwrap();
        assert_eq!(summary.total_sales, 2);
        assert_eq!(summary.total_revenue_cents, 6900);

        let filter = SalesFilter {
            category: Some("Shoes".to_string()),
            ..Default::default()
        };
        let summary = sales_summary(&store, &session, &filter).await.unwrap();
        assert_eq!(summary.total_sales, 1);
        assert_eq!(summary.total_revenue_cents, 5900);
    }
}
