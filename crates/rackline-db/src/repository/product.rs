//! # Product Repository
//!
//! Database operations for products. Catalog listings come back in the
//! canonical browsing order (category, sub-category, base name ascending,
//! NULLs first per SQLite), which the grouping view preserves as-is.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use rackline_core::types::{Product, ProductDraft};

use crate::error::{DbError, DbResult};

const COLUMNS: &str =
    "id, brand_id, category, sub_category, base_name, description, price_cents, created_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists a brand's products in catalog order.
    pub async fn list_by_brand(&self, brand_id: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products
             WHERE brand_id = ?
             ORDER BY category ASC, sub_category ASC, base_name ASC"
        ))
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(brand_id, count = products.len(), "listed products");
        Ok(products)
    }

    /// Fetches a single product by id.
    pub async fn get(&self, product_id: i64) -> DbResult<Product> {
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = ?"))
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("product", product_id))
    }

    /// Fetches the products with the given ids; missing ids are omitted.
    pub async fn by_ids(&self, ids: &[i64]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM products WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        builder.push(")");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    /// Inserts a product under a brand.
    pub async fn insert(&self, brand_id: i64, draft: &ProductDraft) -> DbResult<Product> {
        debug!(brand_id, base_name = %draft.base_name, "inserting product");

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (brand_id, category, sub_category, base_name, description, price_cents)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(brand_id)
        .bind(&draft.category)
        .bind(&draft.sub_category)
        .bind(&draft.base_name)
        .bind(&draft.description)
        .bind(draft.price_cents)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces a product's editable fields.
    pub async fn update(&self, product_id: i64, draft: &ProductDraft) -> DbResult<Product> {
        debug!(product_id, "updating product");

        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products
             SET category = ?, sub_category = ?, base_name = ?, description = ?, price_cents = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.category)
        .bind(&draft.sub_category)
        .bind(&draft.base_name)
        .bind(&draft.description)
        .bind(draft.price_cents)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("product", product_id))
    }

    /// Deletes a product. Variants go with it (ON DELETE CASCADE); sale
    /// references are cleared by the schema (ON DELETE SET NULL).
    pub async fn delete(&self, product_id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", product_id));
        }
        debug!(product_id, "deleted product");
        Ok(())
    }
}
