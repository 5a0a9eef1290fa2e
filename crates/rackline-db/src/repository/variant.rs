//! # Variant Repository
//!
//! Database operations for product variants, including the absolute stock
//! write used by the sale transaction.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use rackline_core::types::{Variant, VariantDraft, VariantPatch};

use crate::error::{DbError, DbResult};

const COLUMNS: &str =
    "id, product_id, color, size, sku, barcode, stock, additional_price_cents, created_at";

/// Repository for variant database operations.
#[derive(Debug, Clone)]
pub struct VariantRepository {
    pool: SqlitePool,
}

impl VariantRepository {
    /// Creates a new VariantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VariantRepository { pool }
    }

    /// Lists every variant under a brand's products.
    pub async fn list_by_brand(&self, brand_id: i64) -> DbResult<Vec<Variant>> {
        let variants = sqlx::query_as::<_, Variant>(
            "SELECT v.id, v.product_id, v.color, v.size, v.sku, v.barcode,
                    v.stock, v.additional_price_cents, v.created_at
             FROM product_variants v
             INNER JOIN products p ON p.id = v.product_id
             WHERE p.brand_id = ?
             ORDER BY v.id ASC",
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(brand_id, count = variants.len(), "listed variants");
        Ok(variants)
    }

    /// Fetches a single variant by id.
    pub async fn get(&self, variant_id: i64) -> DbResult<Variant> {
        sqlx::query_as::<_, Variant>(&format!(
            "SELECT {COLUMNS} FROM product_variants WHERE id = ?"
        ))
        .bind(variant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("variant", variant_id))
    }

    /// Fetches the variants with the given ids; missing ids are omitted.
    pub async fn by_ids(&self, ids: &[i64]) -> DbResult<Vec<Variant>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {COLUMNS} FROM product_variants WHERE id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        builder.push(")");

        let variants = builder
            .build_query_as::<Variant>()
            .fetch_all(&self.pool)
            .await?;
        Ok(variants)
    }

    /// Inserts a variant under a product.
    pub async fn insert(&self, draft: &VariantDraft) -> DbResult<Variant> {
        debug!(product_id = draft.product_id, "inserting variant");

        let variant = sqlx::query_as::<_, Variant>(&format!(
            "INSERT INTO product_variants (product_id, color, size, sku, barcode, stock, additional_price_cents)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(draft.product_id)
        .bind(&draft.color)
        .bind(&draft.size)
        .bind(&draft.sku)
        .bind(&draft.barcode)
        .bind(draft.stock)
        .bind(draft.additional_price_cents)
        .fetch_one(&self.pool)
        .await?;

        Ok(variant)
    }

    /// Overwrites a variant's non-identity fields. Color and size are
    /// never patched.
    pub async fn update(&self, variant_id: i64, patch: &VariantPatch) -> DbResult<Variant> {
        debug!(variant_id, "updating variant");

        sqlx::query_as::<_, Variant>(&format!(
            "UPDATE product_variants
             SET sku = ?, barcode = ?, stock = ?, additional_price_cents = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        ))
        .bind(&patch.sku)
        .bind(&patch.barcode)
        .bind(patch.stock)
        .bind(patch.additional_price_cents)
        .bind(variant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("variant", variant_id))
    }

    /// Deletes a variant. Sale references are cleared by the schema.
    pub async fn delete(&self, variant_id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM product_variants WHERE id = ?")
            .bind(variant_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("variant", variant_id));
        }
        debug!(variant_id, "deleted variant");
        Ok(())
    }

    /// Sets a variant's stock to an absolute value.
    pub async fn set_stock(&self, variant_id: i64, stock: i64) -> DbResult<()> {
        let result = sqlx::query("UPDATE product_variants SET stock = ? WHERE id = ?")
            .bind(stock)
            .bind(variant_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("variant", variant_id));
        }
        debug!(variant_id, stock, "set stock");
        Ok(())
    }
}
