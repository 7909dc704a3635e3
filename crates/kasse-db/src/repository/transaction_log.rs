//! # Transaction Log Repository
//!
//! Append-only record of settled sales.
//!
//! ## Wide Row Layout
//! ```text
//! ┌──────────┬─────────────┬──────────────────┬─────────────────────┬────┬────┬────┐
//! │ id       │ recorded_at │ bill_total_cents │ cash_tendered_cents │ SP │ BW │ KF │
//! ├──────────┼─────────────┼──────────────────┼─────────────────────┼────┼────┼────┤
//! │ 5f0c...  │ 2024-06-01… │ 700              │ 750                 │ 2  │ 0  │ 0  │
//! │ 91ab...  │ 2024-06-01… │ 450              │ 500                 │ 1  │ 0  │ 1  │
//! └──────────┴─────────────┴──────────────────┴─────────────────────┴────┴────┴────┘
//!                                                                    ▲
//!                              one INTEGER column per catalog short code
//! ```
//!
//! Code columns are identifiers, so they cannot be bound parameters. They
//! are only ever built from a validated [`ShortCode`] (ASCII letters,
//! digits, underscore) and are always double-quoted. Every value is bound.

use chrono::{DateTime, Utc};
use kasse_core::{CodeQuantity, Money, ShortCode, TransactionRecord};
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;

/// Fixed columns ahead of the per-code quantities.
const BASE_COLUMNS: &str = "id, recorded_at, bill_total_cents, cash_tendered_cents";

/// Repository for `transaction_log`.
#[derive(Debug, Clone)]
pub struct TransactionLogRepository {
    pool: SqlitePool,
}

impl TransactionLogRepository {
    /// Creates a new TransactionLogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionLogRepository { pool }
    }

    /// Current column names of `transaction_log`.
    pub async fn columns(&self) -> DbResult<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info('transaction_log') ORDER BY cid")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }

    /// Adds a quantity column for every code that lacks one.
    ///
    /// Runs at session start, before the first sale. Existing rows read
    /// zero for a newly added code.
    ///
    /// ## Returns
    /// The codes that got a new column.
    pub async fn ensure_code_columns(&self, codes: &[ShortCode]) -> DbResult<Vec<ShortCode>> {
        let existing = self.columns().await?;
        let mut added = Vec::new();

        for code in codes {
            if existing.iter().any(|name| code.matches(name)) {
                continue;
            }

            let sql = format!(
                "ALTER TABLE transaction_log ADD COLUMN {} INTEGER NOT NULL DEFAULT 0",
                quoted(code)
            );
            sqlx::query(&sql).execute(&self.pool).await?;

            info!(code = %code, "Added transaction_log column");
            added.push(code.clone());
        }

        Ok(added)
    }

    /// Appends one record.
    pub async fn append(&self, record: &TransactionRecord) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        append_on(&mut conn, record).await
    }

    /// Number of stored records.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transaction_log")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Most recently appended record, read back with the given code columns.
    pub async fn latest(&self, codes: &[ShortCode]) -> DbResult<Option<TransactionRecord>> {
        let code_columns: String = codes
            .iter()
            .map(|code| format!(", {}", quoted(code)))
            .collect();
        let sql = format!(
            "SELECT {BASE_COLUMNS}{code_columns} FROM transaction_log ORDER BY rowid DESC LIMIT 1"
        );

        let Some(row) = sqlx::query(&sql).fetch_optional(&self.pool).await? else {
            return Ok(None);
        };

        let recorded_at: DateTime<Utc> = row.try_get("recorded_at")?;
        let mut quantities = Vec::with_capacity(codes.len());
        for (offset, code) in codes.iter().enumerate() {
            quantities.push(CodeQuantity {
                code: code.clone(),
                quantity: row.try_get(4 + offset)?,
            });
        }

        Ok(Some(TransactionRecord {
            id: row.try_get("id")?,
            recorded_at,
            bill_total: Money::from_cents(row.try_get("bill_total_cents")?),
            cash_tendered: Money::from_cents(row.try_get("cash_tendered_cents")?),
            quantities,
        }))
    }
}

/// [`TransactionLogRepository::append`] on a given connection.
///
/// Fails if any of the record's codes has no column.
pub async fn append_on(conn: &mut SqliteConnection, record: &TransactionRecord) -> DbResult<()> {
    let code_columns: String = record
        .quantities
        .iter()
        .map(|q| format!(", {}", quoted(&q.code)))
        .collect();
    let placeholders = ", ?".repeat(record.quantities.len());
    let sql = format!(
        "INSERT INTO transaction_log ({BASE_COLUMNS}{code_columns}) VALUES (?, ?, ?, ?{placeholders})"
    );

    let mut query = sqlx::query(&sql)
        .bind(&record.id)
        .bind(record.recorded_at)
        .bind(record.bill_total.cents())
        .bind(record.cash_tendered.cents());
    for line in &record.quantities {
        query = query.bind(line.quantity);
    }

    query.execute(&mut *conn).await?;

    debug!(
        id = %record.id,
        bill_total = %record.bill_total,
        cash_tendered = %record.cash_tendered,
        "Transaction appended"
    );
    Ok(())
}

/// Double-quoted column identifier for a short code.
fn quoted(code: &ShortCode) -> String {
    format!("\"{}\"", code.as_str())
}
