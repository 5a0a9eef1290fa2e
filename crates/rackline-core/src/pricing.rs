//! # Sale Pricing
//!
//! The pricing law for sale transactions and the stock deduction rule.
//!
//! ## The Pricing Law
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  For unit price U, quantity Q, requested discount D:                    │
//! │                                                                         │
//! │  normal     total = U × Q              discount recorded = 0            │
//! │  discount   total = max(0, U×Q − D)    discount recorded = D            │
//! │  free_gift  total = 0                  discount recorded = U × Q        │
//! │                                                                         │
//! │  The discount on a `discount` sale is recorded as given, NOT clamped    │
//! │  to the sale total. A free gift records the full notional value as      │
//! │  discount so reporting can show what was given away.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The unit price is whatever the caller resolved at the time of sale
//! (base price + variant additional price); it is never re-derived here.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::SaleType;

// =============================================================================
// Pricing
// =============================================================================

/// The computed monetary outcome of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalePricing {
    /// Amount actually charged.
    pub total: Money,
    /// Discount recorded on the sale row.
    pub discount: Money,
}

/// Applies the pricing law for a sale.
///
/// ## Arguments
/// * `unit_price` - effective price per unit, resolved by the caller
/// * `quantity` - units sold (caller validates > 0)
/// * `sale_type` - transaction classification
/// * `discount` - requested discount; only honoured for `Discount` sales,
///   ignored for `FreeGift` (the notional value wins)
///
/// ## Example
/// ```rust
/// use rackline_core::money::Money;
/// use rackline_core::pricing::price_sale;
/// use rackline_core::types::SaleType;
///
/// let p = price_sale(Money::from_cents(1000), 2, SaleType::Discount, Money::from_cents(500));
/// assert_eq!(p.total.cents(), 1500);
/// assert_eq!(p.discount.cents(), 500);
/// ```
pub fn price_sale(
    unit_price: Money,
    quantity: i64,
    sale_type: SaleType,
    discount: Money,
) -> SalePricing {
    let gross = unit_price.multiply_quantity(quantity);

    match sale_type {
        SaleType::Normal => SalePricing {
            total: gross,
            discount: Money::zero(),
        },
        SaleType::Discount => SalePricing {
            total: (gross - discount).floor_at_zero(),
            discount,
        },
        SaleType::FreeGift => SalePricing {
            total: Money::zero(),
            discount: gross,
        },
    }
}

// =============================================================================
// Stock Deduction
// =============================================================================

/// The stock deduction rule: `max(0, stock − quantity)`.
///
/// There is no insufficient-stock check and no error for overselling;
/// stock silently floors at zero. Backorders are not tracked.
///
/// ## Example
/// ```rust
/// use rackline_core::pricing::deduct_stock;
///
/// assert_eq!(deduct_stock(10, 3), 7);
/// assert_eq!(deduct_stock(2, 5), 0);
/// ```
#[inline]
pub const fn deduct_stock(stock: i64, quantity: i64) -> i64 {
    let remaining = stock - quantity;
    if remaining < 0 {
        0
    } else {
        remaining
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_sale() {
        let p = price_sale(Money::from_cents(1000), 3, SaleType::Normal, Money::zero());
        assert_eq!(p.total.cents(), 3000);
        assert_eq!(p.discount.cents(), 0);
    }

    #[test]
    fn test_normal_sale_ignores_requested_discount() {
        // Only discount sales honour the caller-supplied amount.
        let p = price_sale(
            Money::from_cents(1000),
            1,
            SaleType::Normal,
            Money::from_cents(400),
        );
        assert_eq!(p.total.cents(), 1000);
        assert_eq!(p.discount.cents(), 0);
    }

    #[test]
    fn test_discount_sale() {
        let p = price_sale(
            Money::from_cents(1000),
            2,
            SaleType::Discount,
            Money::from_cents(300),
        );
        assert_eq!(p.total.cents(), 1700);
        assert_eq!(p.discount.cents(), 300);
    }

    #[test]
    fn test_discount_exceeding_total_floors_at_zero() {
        let p = price_sale(
            Money::from_cents(500),
            1,
            SaleType::Discount,
            Money::from_cents(2000),
        );
        assert_eq!(p.total.cents(), 0);
        // Recorded discount stays as given, not clamped.
        assert_eq!(p.discount.cents(), 2000);
    }

    #[test]
    fn test_free_gift() {
        let p = price_sale(
            Money::from_cents(750),
            2,
            SaleType::FreeGift,
            Money::from_cents(100), // ignored
        );
        assert_eq!(p.total.cents(), 0);
        assert_eq!(p.discount.cents(), 1500);
    }

    #[test]
    fn test_deduct_stock_floor() {
        assert_eq!(deduct_stock(10, 3), 7);
        assert_eq!(deduct_stock(3, 3), 0);
        assert_eq!(deduct_stock(2, 5), 0);
        assert_eq!(deduct_stock(0, 1), 0);
    }
}
