//! # Error Types
//!
//! Domain-specific error types for kasse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasse-core errors (this file)                                         │
//! │  ├── CoreError        - Sale rule violations, storage failures         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kasse-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  till app errors                                                       │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← DbError ; CoreError → AppError    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recoverable vs Fatal
//! - `InsufficientPayment`: recovered locally, the sale stays in tendering
//! - `Persistence`: blocks the till until the operator acknowledges it
//! - `MalformedCatalogRow`: fatal at startup, the session cannot begin

use thiserror::Error;

use crate::money::Money;
use crate::till::Phase;

// =============================================================================
// Core Error
// =============================================================================

/// Register business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The tapped short code is not in this session's catalog.
    #[error("Item not found: {0}")]
    UnknownItem(String),

    /// The intent is not accepted in the current phase.
    ///
    /// ## When This Occurs
    /// - Cash tapped while still ringing up items
    /// - Confirm pressed before the cash pad was opened
    /// - Anything but acknowledge while a fault is showing
    #[error("{intent} is not allowed while {phase}")]
    InvalidTransition { intent: &'static str, phase: Phase },

    /// Tender requested with nothing rung up.
    #[error("Nothing to pay: the sale has no items")]
    EmptyLedger,

    /// The ledger reached its entry cap.
    #[error("A sale cannot have more than {max} items")]
    LedgerFull { max: usize },

    /// An amount that is not part of the till's coin/note schedule.
    #[error("{0} is not a valid coin or note")]
    UnknownDenomination(Money),

    /// Tendered cash does not cover the bill.
    ///
    /// ## User Workflow
    /// ```text
    /// Bill 3.50, tendered 2.00, press OK
    ///      │
    ///      ▼
    /// InsufficientPayment { due: 3.50, tendered: 2.00 }
    ///      │
    ///      ▼
    /// Banner "1.50 missing", cash pad stays open
    /// ```
    #[error("Insufficient payment: due {due}, tendered {tendered}")]
    InsufficientPayment { due: Money, tendered: Money },

    /// Writing the settlement to storage failed; nothing was committed.
    #[error("Could not record the sale: {0}")]
    Persistence(String),

    /// A catalog row could not be turned into a sellable item.
    #[error("Malformed catalog row {row}: {reason}")]
    MalformedCatalogRow { row: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a MalformedCatalogRow error.
    pub fn malformed_row(row: impl ToString, reason: impl Into<String>) -> Self {
        CoreError::MalformedCatalogRow {
            row: row.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is reserved.
    #[error("{field} '{value}' is reserved")]
    Reserved { field: String, value: String },

    /// Duplicate value (e.g., two catalog rows with the same short code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
