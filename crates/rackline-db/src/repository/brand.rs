//! # Brand Repository
//!
//! Database operations for brands: the lazy-created tenant row scoping
//! everything else. One brand per user, enforced by UNIQUE(user_id).

use sqlx::SqlitePool;
use tracing::debug;

use rackline_core::types::Brand;

use crate::error::{DbError, DbResult};

const COLUMNS: &str = "id, user_id, name, created_at";

/// Repository for brand database operations.
#[derive(Debug, Clone)]
pub struct BrandRepository {
    pool: SqlitePool,
}

impl BrandRepository {
    /// Creates a new BrandRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BrandRepository { pool }
    }

    /// Finds the brand owned by a user, if any.
    pub async fn find_by_user(&self, user_id: &str) -> DbResult<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>(&format!(
            "SELECT {COLUMNS} FROM brands WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brand)
    }

    /// Inserts a brand for a user. Fails on the UNIQUE(user_id) constraint
    /// if the user already has one.
    pub async fn insert(&self, user_id: &str, name: &str) -> DbResult<Brand> {
        debug!(user_id, name, "inserting brand");

        let brand = sqlx::query_as::<_, Brand>(&format!(
            "INSERT INTO brands (user_id, name) VALUES (?, ?) RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(brand)
    }

    /// Renames a brand, returning the updated row.
    pub async fn rename(&self, brand_id: i64, name: &str) -> DbResult<Brand> {
        debug!(brand_id, name, "renaming brand");

        sqlx::query_as::<_, Brand>(&format!(
            "UPDATE brands SET name = ? WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(brand_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("brand", brand_id))
    }
}
