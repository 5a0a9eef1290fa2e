//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every price, discount and sale total in the system is an i64        │
//! │    number of cents. The CSV surface converts to and from decimal       │
//! │    strings at the boundary, never mid-calculation.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rackline_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 3297);
//! assert_eq!(line.to_decimal_string(), "32.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results of discount math may dip below
///   zero before being floored
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use rackline_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Clamps the value at zero. Negative becomes zero, everything else is
    /// returned unchanged. Used by the discount pricing rule.
    #[inline]
    pub const fn floor_at_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Parses a decimal string ("12", "12.5", "12.50") into Money.
    ///
    /// ## CSV Boundary
    /// This is the read half of the CSV price surface. Behaviour mirrors the
    /// import contract: anything unparseable yields `None` and the caller
    /// falls back to zero. At most two fraction digits are honoured; extra
    /// digits are truncated.
    ///
    /// ## Example
    /// ```rust
    /// use rackline_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("12.50"), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::parse_decimal("12.5"), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::parse_decimal("12"), Some(Money::from_cents(1200)));
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (major_part, minor_part) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_part.is_empty() && minor_part.is_empty() {
            return None;
        }

        let major: i64 = if major_part.is_empty() {
            0
        } else {
            major_part.parse().ok()?
        };

        // Normalise the fraction to exactly two digits: pad or truncate.
        let minor: i64 = if minor_part.is_empty() {
            0
        } else {
            if !minor_part.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let padded: String = format!("{:0<2}", minor_part).chars().take(2).collect();
            padded.parse().ok()?
        };

        let cents = major.checked_mul(100)?.checked_add(minor)?;
        Some(if negative { Money(-cents) } else { Money(cents) })
    }

    /// Formats the value as a plain decimal string with two fraction digits
    /// ("12.50"). This is the write half of the CSV price surface.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in a human-readable format, for logs and debugging.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_floor_at_zero() {
        assert_eq!(Money::from_cents(-250).floor_at_zero(), Money::zero());
        assert_eq!(Money::from_cents(250).floor_at_zero().cents(), 250);
        assert_eq!(Money::zero().floor_at_zero(), Money::zero());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("12.50"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse_decimal("12.5"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse_decimal("12"), Some(Money::from_cents(1200)));
        assert_eq!(Money::parse_decimal("0.99"), Some(Money::from_cents(99)));
        assert_eq!(Money::parse_decimal(".5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_decimal("-3.25"), Some(Money::from_cents(-325)));
        assert_eq!(Money::parse_decimal(" 7.00 "), Some(Money::from_cents(700)));

        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal("12.x"), None);
        assert_eq!(Money::parse_decimal("."), None);
    }

    #[test]
    fn test_parse_decimal_truncates_extra_digits() {
        // Two fraction digits are the contract; the rest is dropped.
        assert_eq!(Money::parse_decimal("1.999"), Some(Money::from_cents(199)));
    }

    #[test]
    fn test_decimal_string_round_trip() {
        for cents in [0, 5, 99, 100, 1250, 987654] {
            let money = Money::from_cents(cents);
            assert_eq!(Money::parse_decimal(&money.to_decimal_string()), Some(money));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }
}
