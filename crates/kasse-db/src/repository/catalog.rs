//! # Catalog Repository
//!
//! Database operations on `food_list`.
//!
//! ## Sold Counter Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  read_sold_count("SP")  ──►  SELECT sold FROM food_list ...   → 10     │
//! │  increment_sold("SP", 2) ─►  UPDATE ... SET sold = sold + 2            │
//! │                              RETURNING sold                   → 12     │
//! │                                                                         │
//! │  The increment happens inside SQLite, so a stale in-memory count can   │
//! │  never overwrite a newer stored one.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `*_on` functions take a bare connection so the gateway can run them
//! inside its settlement transaction.

use kasse_core::{Money, ShortCode};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Raw `food_list` row, before domain validation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FoodRow {
    pub id: i64,
    pub name: String,
    pub short_code: String,
    pub price_cents: i64,
    pub sold: i64,
}

/// Repository for `food_list`.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// All rows in id order (the catalog and log column order).
    ///
    /// A row whose stored values do not decode (text in `price_cents`, for
    /// one) fails the whole list with [`DbError::MalformedRow`].
    pub async fn list(&self) -> DbResult<Vec<FoodRow>> {
        let raw = sqlx::query(
            r#"
            SELECT id, name, short_code, price_cents, sold
            FROM food_list
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let rows = raw
            .iter()
            .enumerate()
            .map(|(index, row)| decode_food_row(index, row))
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = rows.len(), "Loaded food_list");
        Ok(rows)
    }

    /// Number of rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM food_list")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Current sold counter of `code`.
    pub async fn read_sold_count(&self, code: &str) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await?;
        read_sold_count_on(&mut conn, code).await
    }

    /// Adds `by` to the sold counter of `code`, returning the new value.
    pub async fn increment_sold(&self, code: &str, by: i64) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await?;
        increment_sold_on(&mut conn, code, by).await
    }

    /// Inserts an item, or updates name and price if the code exists.
    ///
    /// The sold counter of an existing row is left alone.
    ///
    /// ## Returns
    /// The row id.
    pub async fn upsert(&self, name: &str, code: &ShortCode, unit_price: Money) -> DbResult<i64> {
        debug!(code = %code, name = %name, price = %unit_price, "Upserting food item");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO food_list (name, short_code, price_cents)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (short_code) DO UPDATE SET
                name = excluded.name,
                price_cents = excluded.price_cents
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(code.as_str())
        .bind(unit_price.cents())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

/// [`CatalogRepository::read_sold_count`] on a given connection.
pub async fn read_sold_count_on(conn: &mut SqliteConnection, code: &str) -> DbResult<i64> {
    let sold: Option<i64> = sqlx::query_scalar("SELECT sold FROM food_list WHERE short_code = ?1")
        .bind(code)
        .fetch_optional(&mut *conn)
        .await?;

    sold.ok_or_else(|| DbError::not_found("Food item", code))
}

/// [`CatalogRepository::increment_sold`] on a given connection.
pub async fn increment_sold_on(conn: &mut SqliteConnection, code: &str, by: i64) -> DbResult<i64> {
    let sold: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE food_list
        SET sold = sold + ?1
        WHERE short_code = ?2
        RETURNING sold
        "#,
    )
    .bind(by)
    .bind(code)
    .fetch_optional(&mut *conn)
    .await?;

    let sold = sold.ok_or_else(|| DbError::not_found("Food item", code))?;
    debug!(code = %code, by, sold, "Sold counter incremented");
    Ok(sold)
}

fn decode_food_row(index: usize, row: &SqliteRow) -> DbResult<FoodRow> {
    FoodRow::from_row(row).map_err(|e| {
        let id = row
            .try_get::<i64, _>("id")
            .map(|id| id.to_string())
            .unwrap_or_else(|_| format!("#{}", index + 1));
        warn!(row = %id, error = %e, "Undecodable food_list row");
        DbError::MalformedRow {
            table: "food_list".to_string(),
            row: id,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{DbConfig, Database};

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();
        repo.upsert("Soup", &ShortCode::new("SP").unwrap(), Money::from_cents(350))
            .await
            .unwrap();
        repo.upsert("Bratwurst", &ShortCode::new("BW").unwrap(), Money::from_cents(300))
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let db = seeded().await;
        let rows = db.catalog().list().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].short_code, "SP");
        assert_eq!(rows[0].price_cents, 350);
        assert_eq!(rows[0].sold, 0);
        assert_eq!(rows[1].short_code, "BW");
    }

    #[tokio::test]
    async fn test_list_rejects_text_price() {
        let db = seeded().await;
        sqlx::query(
            "INSERT INTO food_list (name, short_code, price_cents) VALUES ('Stew', 'ST', 'three fifty')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.catalog().list().await.unwrap_err();
        assert!(matches!(
            err,
            DbError::MalformedRow { ref row, .. } if row == "3"
        ));
    }

    #[tokio::test]
    async fn test_increment_and_read_sold() {
        let db = seeded().await;
        let repo = db.catalog();

        assert_eq!(repo.increment_sold("SP", 2).await.unwrap(), 2);
        assert_eq!(repo.increment_sold("SP", 3).await.unwrap(), 5);
        assert_eq!(repo.read_sold_count("SP").await.unwrap(), 5);
        assert_eq!(repo.read_sold_count("BW").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_codes_match_case_insensitively() {
        let db = seeded().await;
        let repo = db.catalog();

        assert_eq!(repo.increment_sold("sp", 1).await.unwrap(), 1);
        assert_eq!(repo.read_sold_count("Sp").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let db = seeded().await;
        let repo = db.catalog();

        assert!(matches!(
            repo.read_sold_count("XX").await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.increment_sold("XX", 1).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_upsert_updates_price_keeps_sold() {
        let db = seeded().await;
        let repo = db.catalog();
        repo.increment_sold("SP", 4).await.unwrap();

        let first = repo.list().await.unwrap()[0].id;
        let id = repo
            .upsert("Pea Soup", &ShortCode::new("SP").unwrap(), Money::from_cents(400))
            .await
            .unwrap();

        assert_eq!(id, first);
        assert_eq!(repo.count().await.unwrap(), 2);

        let row = &repo.list().await.unwrap()[0];
        assert_eq!(row.name, "Pea Soup");
        assert_eq!(row.price_cents, 400);
        assert_eq!(row.sold, 4);
    }
}
