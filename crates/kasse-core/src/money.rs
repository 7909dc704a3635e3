//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Tapping "10 Cent" three times with binary floats:                     │
//! │    0.1 + 0.1 + 0.1 = 0.30000000000000004  ❌ WRONG!                     │
//! │                                                                         │
//! │  After a busy evening of small coins the drawer and the log disagree.  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 10 + 10 = 30 cents, exactly, every time                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasse_core::money::Money;
//!
//! let soup = Money::from_cents(350); // 3.50
//! let two_soups = soup * 2;          // 7.00
//! assert_eq!(two_soups.cents(), 700);
//!
//! // Decimal text is parsed with integer math, never through f64
//! let parsed: Money = "3.50".parse().unwrap();
//! assert_eq!(parsed, soup);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: change = tendered - due may be negative before the
///   sufficiency check rejects it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as cents**: the display layer adds symbol and separator
///
/// ## Where Money is Used
/// ```text
/// CatalogItem.unit_price ──► LineItem.unit_price ──► Ledger.subtotal ──┐
///                                                                      ├──► change
/// Denomination.value ──────► CashTender.total ─────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use kasse_core::money::Money;
    ///
    /// let price = Money::from_cents(350);
    /// assert_eq!(price.cents(), 350);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (euros and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
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

    /// Returns the major unit (euro) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal text such as `"3.50"`, `"2"`, `"0,5"` or `"-1.25"`.
///
/// ## Rules
/// - Optional leading `-`
/// - `.` or `,` as decimal separator (the stand's screen prints `3,50 €`)
/// - At most two fractional digits
/// - A trailing currency sign (`€`) is ignored
///
/// The digits are combined with integer arithmetic; no float is involved.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let text = s.trim().trim_end_matches('€').trim();
        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (major_text, minor_text) = match unsigned.split_once(|c| c == '.' || c == ',') {
            Some((major, minor)) => (major, minor),
            None => (unsigned, ""),
        };

        if major_text.is_empty() && minor_text.is_empty() {
            return Err(invalid("no digits"));
        }
        if !major_text.chars().all(|c| c.is_ascii_digit())
            || !minor_text.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("must be a decimal number like 3.50"));
        }
        if minor_text.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = if major_text.is_empty() {
            0
        } else {
            major_text.parse().map_err(|_| invalid("amount too large"))?
        };
        let minor: i64 = match minor_text.len() {
            0 => 0,
            1 => minor_text.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => minor_text.parse().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `7.00` / `-0.50`. The presenter adds the currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(3, 50).cents(), 350);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(700).to_string(), "7.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-50).to_string(), "-0.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(350);

        assert_eq!((a + b).cents(), 1350);
        assert_eq!((a - b).cents(), 650);
        assert_eq!((b * 2).cents(), 700);
        assert_eq!(b.multiply_quantity(3).cents(), 1050);
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_cents(350), Money::from_cents(250), Money::from_cents(100)];
        let total: Money = prices.iter().sum();
        assert_eq!(total.cents(), 700);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_parse_decimal_text() {
        assert_eq!("3.50".parse::<Money>().unwrap().cents(), 350);
        assert_eq!("3,5".parse::<Money>().unwrap().cents(), 350);
        assert_eq!("2".parse::<Money>().unwrap().cents(), 200);
        assert_eq!(".05".parse::<Money>().unwrap().cents(), 5);
        assert_eq!("0.01 €".parse::<Money>().unwrap().cents(), 1);
        assert_eq!("-1.25".parse::<Money>().unwrap().cents(), -125);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
    }

    /// Ten-cent taps must add up exactly; this is the defect integer money fixes.
    #[test]
    fn test_small_coins_do_not_drift() {
        let dime = Money::from_cents(10);
        let total: Money = std::iter::repeat(dime).take(1000).sum();
        assert_eq!(total.cents(), 10_000);
    }
}
