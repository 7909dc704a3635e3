//! # Application Error Type
//!
//! Unified error type for the till session.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationError ─┐                                                     │
//! │  CoreError ───────┼──► AppError { code, message } ──► presenter.report │
//! │  DbError ─────────┤         │                        (text or JSON)     │
//! │  input / io ──────┘         └──► startup failure ──► stderr, exit 1    │
//! │                                                                         │
//! │  Storage details are logged, the operator sees a short message.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kasse_core::{CoreError, ValidationError};
use kasse_db::DbError;
use serde::Serialize;

/// Error shown to the operator or returned from startup.
///
/// ## Serialization
/// In JSON output mode a rejected line is reported as:
/// ```json
/// { "kind": "error", "code": "INVALID_TRANSITION", "message": "confirm is not allowed while ringing" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown item or button
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Operator line could not be understood
    InvalidInput,

    /// Action not allowed in the current phase
    InvalidTransition,

    /// Sale rule violated (empty sale, ledger full)
    BusinessLogic,

    /// Tendered cash does not cover the bill
    InsufficientPayment,

    /// Sale could not be stored; till is blocked until acknowledged
    PersistenceFault,

    /// Catalog rows in storage are unusable
    MalformedCatalog,

    /// Database operation failed
    DatabaseError,

    /// Startup configuration problem
    Config,

    /// Internal error
    Internal,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates an input error.
    pub fn input(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidInput, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Config, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                AppError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::MalformedRow { table, row, reason } => {
                tracing::error!(%table, %row, %reason, "Malformed row");
                AppError::new(
                    ErrorCode::MalformedCatalog,
                    format!("Malformed {} row {}: {}", table, row, reason),
                )
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::UnknownItem(_) => ErrorCode::NotFound,
            CoreError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            CoreError::EmptyLedger | CoreError::LedgerFull { .. } => ErrorCode::BusinessLogic,
            CoreError::UnknownDenomination(_) => ErrorCode::InvalidInput,
            CoreError::InsufficientPayment { .. } => ErrorCode::InsufficientPayment,
            CoreError::Persistence(_) => ErrorCode::PersistenceFault,
            CoreError::MalformedCatalogRow { .. } => ErrorCode::MalformedCatalog,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use kasse_core::{Money, Phase};

    #[test]
    fn test_core_error_codes() {
        let err: AppError = CoreError::InsufficientPayment {
            due: Money::from_cents(350),
            tendered: Money::from_cents(200),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientPayment);
        assert_eq!(err.message, "Insufficient payment: due 3.50, tendered 2.00");

        let err: AppError = CoreError::InvalidTransition {
            intent: "confirm",
            phase: Phase::Ringing,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[test]
    fn test_db_errors_hide_sql() {
        let err: AppError = DbError::QueryFailed("no such column: XX".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("XX"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(AppError::input("Unknown command: foo")).unwrap();
        assert_eq!(json["code"], "INVALID_INPUT");
        assert_eq!(json["message"], "Unknown command: foo");
    }
}
