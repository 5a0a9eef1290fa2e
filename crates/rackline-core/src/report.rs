//! # Sales Reporting
//!
//! The sales history filter and the summary fold over filtered sales.
//!
//! ## Filter Split
//! Date range, sale type and product are store-level filters: any backend
//! can apply them while listing. Category lives on the joined product, so
//! it is applied after the product join, in [`matches_category`]. The
//! reporting service wires the two halves together.
//!
//! Date bounds are whole calendar days in UTC: the start bound is the start
//! of the day and the end bound is `23:59:59` of the end day, both
//! inclusive.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Sale, SaleType, SaleWithDetails};

// =============================================================================
// Filter
// =============================================================================

/// Criteria for listing sales. Every field is optional; an empty filter
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesFilter {
    /// First calendar day (UTC) to include.
    pub start_date: Option<NaiveDate>,
    /// Last calendar day (UTC) to include.
    pub end_date: Option<NaiveDate>,
    pub sale_type: Option<SaleType>,
    /// Category of the joined product; applied after the join.
    pub category: Option<String>,
    pub product_id: Option<i64>,
}

impl SalesFilter {
    /// Inclusive lower timestamp bound: start of `start_date`.
    pub fn start_bound(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
    }

    /// Inclusive upper timestamp bound: `23:59:59` of `end_date`.
    pub fn end_bound(&self) -> Option<DateTime<Utc>> {
        self.end_date.and_then(|d| {
            let time = NaiveTime::from_hms_opt(23, 59, 59)?;
            Some(Utc.from_utc_datetime(&d.and_time(time)))
        })
    }

    /// Applies the store-level half of the filter: date range, sale type
    /// and product id. Category is deliberately not consulted here.
    pub fn matches_sale(&self, sale: &Sale) -> bool {
        if let Some(start) = self.start_bound() {
            if sale.created_at < start {
                return false;
            }
        }
        if let Some(end) = self.end_bound() {
            if sale.created_at > end {
                return false;
            }
        }
        if let Some(ty) = self.sale_type {
            if sale.sale_type != ty {
                return false;
            }
        }
        if let Some(product_id) = self.product_id {
            if sale.product_id != Some(product_id) {
                return false;
            }
        }
        true
    }
}

/// Applies the category half of the filter to a joined sale.
///
/// A sale whose product reference no longer resolves has no category and
/// never matches a category filter.
pub fn matches_category(filter: &SalesFilter, detail: &SaleWithDetails) -> bool {
    match &filter.category {
        None => true,
        Some(wanted) => detail
            .product
            .as_ref()
            .and_then(|p| p.category.as_deref())
            .map(|c| c == wanted)
            .unwrap_or(false),
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Aggregate totals over a list of sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Number of sale records.
    pub total_sales: i64,
    /// Sum of charged totals, in cents.
    pub total_revenue_cents: i64,
    /// Sum of recorded discounts, in cents. Includes the notional value of
    /// free gifts.
    pub total_discount_cents: i64,
    /// Sum of quantities across all sales.
    pub total_quantity: i64,
    pub normal_count: i64,
    pub discount_count: i64,
    pub free_gift_count: i64,
}

impl SalesSummary {
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }

    #[inline]
    pub fn total_discount(&self) -> Money {
        Money::from_cents(self.total_discount_cents)
    }
}

/// Folds a list of sales into its summary. An empty list yields the
/// all-zero summary.
pub fn summarize(sales: &[Sale]) -> SalesSummary {
    let mut summary = SalesSummary::default();

    for sale in sales {
        summary.total_sales += 1;
        summary.total_revenue_cents += sale.total_cents;
        summary.total_discount_cents += sale.discount_cents;
        summary.total_quantity += sale.quantity;

        match sale.sale_type {
            SaleType::Normal => summary.normal_count += 1,
            SaleType::Discount => summary.discount_count += 1,
            SaleType::FreeGift => summary.free_gift_count += 1,
        }
    }

    summary
}

// =============================================================================
// Unit Tests
// =============================================================================
