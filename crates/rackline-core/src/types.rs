//! # Domain Types
//!
//! Core domain types used throughout Rackline POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Brand       │   │    Product      │   │    Variant      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄──│  brand_id       │◄──│  product_id     │       │
//! │  │  user_id        │   │  base_name      │   │  color / size   │       │
//! │  │  name           │   │  price_cents    │   │  stock          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                 ▲                     ▲                 │
//! │                                 │ (nullable)          │ (nullable)     │
//! │                          ┌──────┴─────────────────────┴──────┐         │
//! │                          │              Sale                 │         │
//! │                          │  quantity, sale_type, totals      │         │
//! │                          └───────────────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity id is an integer assigned by the backing store.
//! A sale keeps nullable references so history survives catalog deletions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{DEFAULT_CATEGORY, DEFAULT_SUB_CATEGORY};

// =============================================================================
// Brand
// =============================================================================

/// The merchant/tenant owning a catalog and its sales history.
///
/// One brand per user, created lazily on the first authenticated session.
/// The name is mutable; a brand is never deleted by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Brand {
    /// Unique identifier assigned by the store.
    pub id: i64,

    /// Owning user identifier (opaque string from the auth collaborator).
    pub user_id: String,

    /// Display name.
    pub name: String,

    /// When the brand was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry. Concrete sellable units are its [`Variant`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,

    /// Brand this product belongs to.
    pub brand_id: i64,

    /// Optional category, e.g. "Tops". Displays as "Uncategorized" when absent.
    pub category: Option<String>,

    /// Optional sub-category, e.g. "Tee". Displays as "General" when absent.
    pub sub_category: Option<String>,

    /// Base name, required and non-empty.
    pub base_name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Base price in cents. Variant prices add on top of this.
    pub price_cents: i64,

    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Category for display grouping, defaulting when absent.
    #[inline]
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Sub-category for display grouping, defaulting when absent.
    #[inline]
    pub fn sub_category_label(&self) -> &str {
        self.sub_category.as_deref().unwrap_or(DEFAULT_SUB_CATEGORY)
    }
}

/// Fields for creating or replacing a product. The store assigns id,
/// brand ownership and timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub base_name: String,
    pub description: Option<String>,
    pub price_cents: i64,
}

// =============================================================================
// Variant
// =============================================================================

/// A concrete sellable unit of a product, distinguished by color and/or size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Variant {
    pub id: i64,

    /// Owning product.
    pub product_id: i64,

    pub color: Option<String>,
    pub size: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,

    /// On-hand stock count, never negative (floored at zero on deduction).
    pub stock: i64,

    /// Added to the product's base price for the effective unit price.
    pub additional_price_cents: i64,

    pub created_at: DateTime<Utc>,
}

impl Variant {
    /// Effective unit price: product base price + variant additional price.
    #[inline]
    pub fn unit_price(&self, product: &Product) -> Money {
        Money::from_cents(product.price_cents + self.additional_price_cents)
    }

    /// Returns the additional price as a Money type.
    #[inline]
    pub fn additional_price(&self) -> Money {
        Money::from_cents(self.additional_price_cents)
    }
}

/// Fields for creating a variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantDraft {
    pub product_id: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub stock: i64,
    pub additional_price_cents: i64,
}

/// Fields the import reconciler overwrites on an existing variant.
/// Color and size are the variant's identity and are never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantPatch {
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub stock: i64,
    pub additional_price_cents: i64,
}

// =============================================================================
// Sale Type
// =============================================================================

/// Classification of a transaction: full-price, discounted, or zero-charge gift.
///
/// Exactly three wire tags exist: `normal`, `discount`, `free_gift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
    /// Full price charged, no discount recorded.
    Normal,
    /// A flat discount amount subtracted from the line total.
    Discount,
    /// Nothing charged; the full notional value is recorded as discount.
    FreeGift,
}

impl SaleType {
    /// The wire/CSV tag for this sale type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleType::Normal => "normal",
            SaleType::Discount => "discount",
            SaleType::FreeGift => "free_gift",
        }
    }
}

impl Default for SaleType {
    fn default() -> Self {
        SaleType::Normal
    }
}

impl fmt::Display for SaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(SaleType::Normal),
            "discount" => Ok(SaleType::Discount),
            "free_gift" => Ok(SaleType::FreeGift),
            _ => Err(ValidationError::NotAllowed {
                field: "sale_type".to_string(),
                allowed: vec![
                    "normal".to_string(),
                    "discount".to_string(),
                    "free_gift".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of a completed transaction.
///
/// Once created, a sale is never mutated or deleted by the application.
/// Product and variant references are nullable so history survives
/// catalog deletions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub brand_id: i64,
    pub product_id: Option<i64>,
    pub product_variant_id: Option<i64>,

    /// Units sold, always positive.
    pub quantity: i64,

    pub sale_type: SaleType,

    /// Recorded discount in cents. For free gifts this is the full notional
    /// value of the sale even though nothing was charged.
    pub discount_cents: i64,

    /// Amount actually charged, in cents.
    pub total_cents: i64,

    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the charged total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the recorded discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }
}

/// Fields for persisting a new sale. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub brand_id: i64,
    pub product_id: Option<i64>,
    pub product_variant_id: Option<i64>,
    pub quantity: i64,
    pub sale_type: SaleType,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub note: Option<String>,
}

// =============================================================================
// Derived Aggregates
// =============================================================================

/// A product with its variant list and summed stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithVariants {
    pub product: Product,
    pub variants: Vec<Variant>,
    /// Sum of variant stock; zero for a variant-less product.
    pub total_stock: i64,
}

/// A sale joined with the product and variant it referenced, when they
/// still exist. Used by reporting and the sales CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleWithDetails {
    pub sale: Sale,
    pub product: Option<Product>,
    pub variant: Option<Variant>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(category: Option<&str>, price_cents: i64) -> Product {
        Product {
            id: 1,
            brand_id: 1,
            category: category.map(String::from),
            sub_category: None,
            base_name: "Crew Tee".to_string(),
            description: None,
            price_cents,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_category_labels_default() {
        let p = product(None, 1000);
        assert_eq!(p.category_label(), "Uncategorized");
        assert_eq!(p.sub_category_label(), "General");

        let p = product(Some("Tops"), 1000);
        assert_eq!(p.category_label(), "Tops");
    }

    #[test]
    fn test_variant_unit_price() {
        let p = product(Some("Tops"), 1500);
        let v = Variant {
            id: 7,
            product_id: 1,
            color: Some("Black".to_string()),
            size: Some("M".to_string()),
            sku: None,
            barcode: None,
            stock: 3,
            additional_price_cents: 250,
            created_at: p.created_at,
        };
        assert_eq!(v.unit_price(&p).cents(), 1750);
    }

    #[test]
    fn test_sale_type_round_trip() {
        for ty in [SaleType::Normal, SaleType::Discount, SaleType::FreeGift] {
            assert_eq!(ty.as_str().parse::<SaleType>().unwrap(), ty);
        }
        assert!("refund".parse::<SaleType>().is_err());
    }

    #[test]
    fn test_sale_type_serde_tags() {
        assert_eq!(
            serde_json::to_string(&SaleType::FreeGift).unwrap(),
            "\"free_gift\""
        );
        let ty: SaleType = serde_json::from_str("\"discount\"").unwrap();
        assert_eq!(ty, SaleType::Discount);
    }
}
