//! # Domain Types
//!
//! Core domain types used throughout Kasse.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  CatalogItem    │   │    LineItem     │   │ TransactionRecord   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (row)       │──►│  code           │──►│  id (UUID)          │   │
//! │  │  code (business)│   │  name  (frozen) │   │  recorded_at        │   │
//! │  │  name           │   │  price (frozen) │   │  bill_total         │   │
//! │  │  unit_price     │   └─────────────────┘   │  cash_tendered      │   │
//! │  │  sold_count     │                         │  quantities[code]   │   │
//! │  └─────────────────┘                         └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! Catalog items have a row `id` for storage and a `ShortCode` as the
//! business key. The short code is also the transaction log column name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_item_name, validate_short_code, validate_sold_count, validate_unit_price_cents,
};

// =============================================================================
// Short Code
// =============================================================================

/// Validated item short code (e.g. `SP` for soup).
///
/// A `ShortCode` can only be built through validation, so any value of this
/// type is safe to use as a quoted transaction log column name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Validates and wraps a short code. Surrounding whitespace is trimmed.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        let code = code.trim();
        validate_short_code(code)?;
        Ok(ShortCode(code.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SQLite column names are case-insensitive, so short codes are too.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl TryFrom<String> for ShortCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ShortCode::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(code: ShortCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// An item the stand sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Storage row identifier.
    pub id: i64,

    /// Display name shown on the item button.
    pub name: String,

    /// Business key and transaction log column.
    pub code: ShortCode,

    /// Price per tap.
    pub unit_price: Money,

    /// Units sold over the catalog's lifetime, as last read from storage.
    pub sold_count: i64,
}

impl CatalogItem {
    /// Builds a catalog item from raw row values, validating every field.
    ///
    /// ## Rules
    /// - Short code passes [`validate_short_code`]
    /// - Name is not blank
    /// - Unit price is positive
    /// - Sold count is not negative
    pub fn try_new(
        id: i64,
        name: impl Into<String>,
        code: impl Into<String>,
        unit_price_cents: i64,
        sold_count: i64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_item_name(&name)?;
        let code = ShortCode::new(code)?;
        validate_unit_price_cents(unit_price_cents)?;
        validate_sold_count(sold_count)?;

        Ok(CatalogItem {
            id,
            name: name.trim().to_string(),
            code,
            unit_price: Money::from_cents(unit_price_cents),
            sold_count,
        })
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One tap of an item button.
///
/// Uses the snapshot pattern: name and price are frozen at tap time so a
/// catalog change cannot alter an open sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub code: ShortCode,
    pub name: String,
    pub unit_price: Money,
}

impl LineItem {
    /// Snapshots a catalog item.
    pub fn from_item(item: &CatalogItem) -> Self {
        LineItem {
            code: item.code.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
        }
    }
}

// =============================================================================
// Transaction Record
// =============================================================================

/// Quantity of one catalog code within a single sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeQuantity {
    pub code: ShortCode,
    pub quantity: i64,
}

/// The persisted form of a settled sale.
///
/// `quantities` holds one entry per catalog code, in catalog order, with
/// zero for codes not sold in this sale (the wide transaction log schema).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub bill_total: Money,
    pub cash_tendered: Money,
    pub quantities: Vec<CodeQuantity>,
}

impl TransactionRecord {
    /// Change handed back to the customer.
    pub fn change(&self) -> Money {
        self.cash_tendered - self.bill_total
    }

    /// Total units across all codes.
    pub fn total_quantity(&self) -> i64 {
        self.quantities.iter().map(|q| q.quantity).sum()
    }

    /// Codes actually sold in this transaction.
    pub fn touched(&self) -> impl Iterator<Item = &CodeQuantity> {
        self.quantities.iter().filter(|q| q.quantity > 0)
    }

    /// Quantity recorded for `code` (zero if absent).
    pub fn quantity_of(&self, code: &str) -> i64 {
        self.quantities
            .iter()
            .find(|q| q.code.matches(code))
            .map(|q| q.quantity)
            .unwrap_or(0)
    }
}

// =============================================================================
// Settlement Receipt
// =============================================================================

/// Persisted sold counter of one code after a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoldCount {
    pub code: ShortCode,
    pub sold: i64,
}

/// What a successful settlement reports back to the till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub record_id: String,
    pub bill_total: Money,
    pub cash_tendered: Money,
    pub change: Money,
    pub sold_counts: Vec<SoldCount>,
}

// =============================================================================
// Unit Tests
// =============================================================================
