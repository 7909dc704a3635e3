//! # Validation Module
//!
//! Input validation for catalog rows and operator input.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load (kasse-db row → CatalogItem)                    │
//! │  └── THIS MODULE: short code, name, price, sold count                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Till intents                                                 │
//! │  └── Typed: ShortCode, Denomination (invalid values cannot exist)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE short_code                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Short codes become column names of the transaction log, so their rules
//! are stricter than a plain identifier's.

use crate::error::ValidationError;
use crate::MAX_SHORT_CODE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Fixed columns of the transaction log. A short code may not shadow them.
///
/// SQLite compares column names case-insensitively, so the check does too.
pub const RESERVED_LOG_COLUMNS: &[&str] =
    &["id", "recorded_at", "bill_total_cents", "cash_tendered_cents"];

/// Validates an item short code.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_SHORT_CODE_LEN`] characters
/// - ASCII letters, digits and underscores only
/// - Must not equal a reserved transaction log column
///
/// ## Example
/// ```rust
/// use kasse_core::validation::validate_short_code;
///
/// assert!(validate_short_code("SP").is_ok());
/// assert!(validate_short_code("WURST_2").is_ok());
/// assert!(validate_short_code("").is_err());
/// assert!(validate_short_code("a b").is_err());
/// assert!(validate_short_code("ID").is_err());
/// ```
pub fn validate_short_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "short_code".to_string(),
        });
    }

    if code.len() > MAX_SHORT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "short_code".to_string(),
            max: MAX_SHORT_CODE_LEN,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field: "short_code".to_string(),
            reason: "must contain only letters, numbers and underscores".to_string(),
        });
    }

    if RESERVED_LOG_COLUMNS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
    {
        return Err(ValidationError::Reserved {
            field: "short_code".to_string(),
            value: code.to_string(),
        });
    }

    Ok(())
}

/// Validates an item display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 60 characters (one button line on the stand's screen)
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 60 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 60,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be positive; the stand does not sell free items through the till
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a persisted sold counter.
pub fn validate_sold_count(sold: i64) -> ValidationResult<()> {
    if sold < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "sold".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
