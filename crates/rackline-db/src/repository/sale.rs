//! # Sale Repository
//!
//! Database operations for the immutable sale history. There is no update
//! or delete here on purpose: sales are append-only, and catalog deletions
//! clear references via the schema instead of touching rows.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use rackline_core::report::SalesFilter;
use rackline_core::types::{Sale, SaleDraft};

use crate::error::DbResult;

const COLUMNS: &str = "id, brand_id, product_id, product_variant_id, quantity, sale_type, \
                       discount_cents, total_cents, note, created_at";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Appends a sale record.
    pub async fn insert(&self, draft: &SaleDraft) -> DbResult<Sale> {
        debug!(
            brand_id = draft.brand_id,
            sale_type = %draft.sale_type,
            total_cents = draft.total_cents,
            "inserting sale"
        );

        let sale = sqlx::query_as::<_, Sale>(&format!(
            "INSERT INTO sales (brand_id, product_id, product_variant_id, quantity, sale_type, discount_cents, total_cents, note)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(draft.brand_id)
        .bind(draft.product_id)
        .bind(draft.product_variant_id)
        .bind(draft.quantity)
        .bind(draft.sale_type.as_str())
        .bind(draft.discount_cents)
        .bind(draft.total_cents)
        .bind(&draft.note)
        .fetch_one(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists a brand's sales newest-first, applying the store-level half
    /// of the filter (date range, sale type, product id). The category
    /// filter needs the product join and is applied above this layer.
    pub async fn list(&self, brand_id: i64, filter: &SalesFilter) -> DbResult<Vec<Sale>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {COLUMNS} FROM sales WHERE brand_id = "
        ));
        builder.push_bind(brand_id);

        // Timestamps are stored as '%Y-%m-%dT%H:%M:%fZ' text; bind bounds in
        // the same shape so the string comparison orders correctly.
        if let Some(start) = filter.start_bound() {
            builder.push(" AND created_at >= ");
            builder.push_bind(start.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string());
        }
        if let Some(end) = filter.end_bound() {
            builder.push(" AND created_at <= ");
            builder.push_bind(end.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string());
        }
        if let Some(sale_type) = filter.sale_type {
            builder.push(" AND sale_type = ");
            builder.push_bind(sale_type.as_str());
        }
        if let Some(product_id) = filter.product_id {
            builder.push(" AND product_id = ");
            builder.push_bind(product_id);
        }

        builder.push(" ORDER BY created_at DESC, id DESC");

        let sales = builder
            .build_query_as::<Sale>()
            .fetch_all(&self.pool)
            .await?;

        debug!(brand_id, count = sales.len(), "listed sales");
        Ok(sales)
    }
}
