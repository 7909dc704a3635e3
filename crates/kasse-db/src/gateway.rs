//! # SQLite Persistence Gateway
//!
//! [`PersistenceGateway`] backed by the kasse database.
//!
//! ## Atomic Settlement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    for each code with quantity > 0:                                     │
//! │      read_sold_count(code)                                              │
//! │      increment_sold(code, quantity)      ── sold = sold + quantity      │
//! │    append_transaction(record)                                           │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction, which rolls back every  │
//! │  counter increment together with the log row.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use kasse_core::{
    CatalogItem, CoreError, CoreResult, PersistenceGateway, SoldCount, TransactionRecord,
};
use tracing::{debug, info, warn};

use crate::error::DbError;
use crate::pool::Database;
use crate::repository::catalog::{increment_sold_on, read_sold_count_on};
use crate::repository::transaction_log::append_on;

/// Gateway over a [`Database`].
#[derive(Debug, Clone)]
pub struct SqliteGateway {
    db: Database,
}

impl SqliteGateway {
    pub fn new(db: Database) -> Self {
        SqliteGateway { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn load_catalog(&self) -> CoreResult<Vec<CatalogItem>> {
        let rows = self.db.catalog().list().await?;

        rows.into_iter()
            .map(|row| {
                CatalogItem::try_new(row.id, row.name, row.short_code, row.price_cents, row.sold)
                    .map_err(|e| {
                        warn!(row = row.id, error = %e, "Malformed food_list row");
                        CoreError::malformed_row(row.id, e.to_string())
                    })
            })
            .collect()
    }

    async fn read_sold_count(&self, code: &str) -> CoreResult<i64> {
        Ok(self.db.catalog().read_sold_count(code).await?)
    }

    async fn increment_sold(&self, code: &str, by: i64) -> CoreResult<i64> {
        Ok(self.db.catalog().increment_sold(code, by).await?)
    }

    async fn append_transaction(&self, record: &TransactionRecord) -> CoreResult<()> {
        Ok(self.db.transaction_log().append(record).await?)
    }

    async fn commit_settlement(&self, record: &TransactionRecord) -> CoreResult<Vec<SoldCount>> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut counts = Vec::new();
        for line in record.touched() {
            let before = read_sold_count_on(&mut tx, line.code.as_str()).await?;
            let sold = increment_sold_on(&mut tx, line.code.as_str(), line.quantity).await?;
            debug!(code = %line.code, before, sold, "Counter staged");
            counts.push(SoldCount {
                code: line.code.clone(),
                sold,
            });
        }

        append_on(&mut tx, record).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id = %record.id, codes = counts.len(), "Settlement committed");
        Ok(counts)
    }
}
