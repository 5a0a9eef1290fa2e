//! # Sale Transaction
//!
//! Records a sale against a variant: validate, price, deduct stock, persist.
//!
//! ## Sequence
//! ```text
//! validate ──► resolve variant + product ──► price_sale ──► set_stock ──► insert_sale
//! ```
//!
//! Stock deduction and sale insertion are two separate store calls, not one
//! atomic transaction. A crash between them loses the sale record but keeps
//! the deduction; concurrent sales of the same variant can interleave their
//! read-modify-write and under-deduct. Accepted for a single-operator
//! deployment; see the stock rule in [`rackline_core::pricing`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use rackline_core::money::Money;
use rackline_core::pricing::{deduct_stock, price_sale};
use rackline_core::types::{Sale, SaleDraft, SaleType};
use rackline_core::validation::{validate_discount_cents, validate_quantity};

use crate::error::StoreResult;
use crate::session::Session;
use crate::store::InventoryStore;

// =============================================================================
// Request
// =============================================================================

/// Caller's description of a sale to record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub variant_id: i64,
    pub quantity: i64,
    pub sale_type: SaleType,
    /// Requested discount in cents; only honoured for discount sales.
    pub discount_cents: i64,
    pub note: Option<String>,
}

// =============================================================================
// Transaction
// =============================================================================

/// Records a sale: prices the line, deducts stock (floored at zero) and
/// appends the immutable sale row.
///
/// The unit price is resolved at call time from the current product base
/// price plus the variant's additional price; later price edits never
/// rewrite history.
pub async fn record_sale(
    store: &dyn InventoryStore,
    session: &Session,
    request: SaleRequest,
) -> StoreResult<Sale> {
    validate_quantity(request.quantity)?;
    validate_discount_cents(request.discount_cents)?;

    let variant = store.get_variant(request.variant_id).await?;
    let product = store.get_product(variant.product_id).await?;

    let pricing = price_sale(
        variant.unit_price(&product),
        request.quantity,
        request.sale_type,
        Money::from_cents(request.discount_cents),
    );

    let remaining = deduct_stock(variant.stock, request.quantity);
    store.set_stock(variant.id, remaining).await?;

    debug!(
        variant_id = variant.id,
        quantity = request.quantity,
        sale_type = %request.sale_type,
        total_cents = pricing.total.cents(),
        remaining_stock = remaining,
        "recording sale"
    );

    store
        .insert_sale(&SaleDraft {
            brand_id: session.brand_id(),
            product_id: Some(product.id),
            product_variant_id: Some(variant.id),
            quantity: request.quantity,
            sale_type: request.sale_type,
            discount_cents: pricing.discount.cents(),
            total_cents: pricing.total.cents(),
            note: request.note,
        })
        .await
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::session::open_session;
    use rackline_core::types::{ProductDraft, Variant, VariantDraft};

    async fn fixture() -> (MemoryStore, Session, Variant) {
        let store = MemoryStore::new();
        let session = open_session(&store, "user-1", "shop@example.com")
            .await
            .unwrap();
        let product = store
            .insert_product(
                session.brand_id(),
                &ProductDraft {
                    category: Some("Tops".to_string()),
                    base_name: "Crew Tee".to_string(),
                    price_cents: 1000,
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
                additional_price_cents: 200,
                ..Default::default()
            })
            .await
            .unwrap();
        (store, session, variant)
    }

    fn request(variant_id: i64, quantity: i64, sale_type: SaleType, discount: i64) -> SaleRequest {
        SaleRequest {
            variant_id,
            quantity,
            sale_type,
            discount_cents: discount,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_normal_sale_prices_and_deducts() {
        let (store, session, variant) = fixture().await;

        let sale = record_sale(&store, &session, request(variant.id, 3, SaleType::Normal, 0))
            .await
            .unwrap();

        // Unit price 1000 + 200, three units.
        assert_eq!(sale.total_cents, 3600);
        assert_eq!(sale.discount_cents, 0);
        assert_eq!(store.get_variant(variant.id).await.unwrap().stock, 7);
    }

    #[tokio::test]
    async fn test_normal_sale_ignores_discount_field() {
        let (store, session, variant) = fixture().await;

        let sale = record_sale(
            &store,
            &session,
            request(variant.id, 1, SaleType::Normal, 500),
        )
        .await
        .unwrap();

        assert_eq!(sale.total_cents, 1200);
        assert_eq!(sale.discount_cents, 0);
    }

    #[tokio::test]
    async fn test_discount_sale_floors_total_at_zero() {
        let (store, session, variant) = fixture().await;

        let sale = record_sale(
            &store,
            &session,
            request(variant.id, 1, SaleType::Discount, 5000),
        )
        .await
        .unwrap();

        assert_eq!(sale.total_cents, 0);
        assert_eq!(sale.discount_cents, 5000);
    }

    #[tokio::test]
    async fn test_free_gift_records_notional_discount() {
        let (store, session, variant) = fixture().await;

        let sale = record_sale(
            &store,
            &session,
            request(variant.id, 2, SaleType::FreeGift, 0),
        )
        .await
        .unwrap();

        assert_eq!(sale.total_cents, 0);
        assert_eq!(sale.discount_cents, 2400);
        assert_eq!(store.get_variant(variant.id).await.unwrap().stock, 8);
    }

    #[tokio::test]
    async fn test_oversell_floors_stock_at_zero() {
        let (store, session, variant) = fixture().await;

        let sale = record_sale(
            &store,
            &session,
            request(variant.id, 25, SaleType::Normal, 0),
        )
        .await
        .unwrap();

        // The sale is still priced for the full quantity.
        assert_eq!(sale.quantity, 25);
        assert_eq!(sale.total_cents, 30000);
        assert_eq!(store.get_variant(variant.id).await.unwrap().stock, 0);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_any_write() {
        let (store, session, variant) = fixture().await;

        assert!(
            record_sale(&store, &session, request(variant.id, 0, SaleType::Normal, 0))
                .await
                .is_err()
        );
        assert!(record_sale(
            &store,
            &session,
            request(variant.id, 1, SaleType::Discount, -10)
        )
        .await
        .is_err());

        assert_eq!(store.get_variant(variant.id).await.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_unknown_variant() {
        let (store, session, _) = fixture().await;
        let err = record_sale(&store, &session, request(999, 1, SaleType::Normal, 0))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("variant not found"));
    }
}
