//! # Settlement Arithmetic
//!
//! Pure functions that turn a finished sale into change and a persistable
//! record.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ledger.subtotal() ──┐                                                  │
//! │                      ├──► compute_change() ──► Err(InsufficientPayment) │
//! │  tender.total() ─────┘          │                                       │
//! │                                 ▼ Ok(change >= 0)                       │
//! │  catalog.codes() ──┐                                                    │
//! │  ledger ───────────┼──► build_record() ──► TransactionRecord            │
//! │  tender ───────────┘                       (one quantity per code,      │
//! │                                             zero-filled)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::ledger::LineItemLedger;
use crate::money::Money;
use crate::tender::CashTender;
use crate::types::{CodeQuantity, SettlementReceipt, SoldCount, TransactionRecord};

/// Change owed for a bill.
///
/// ## Returns
/// - `Ok(tendered - due)` when the cash covers the bill (exact cash gives zero)
/// - `Err(InsufficientPayment)` otherwise
///
/// ## Example
/// ```rust
/// use kasse_core::settlement::compute_change;
/// use kasse_core::Money;
///
/// let change = compute_change(Money::from_cents(700), Money::from_cents(750)).unwrap();
/// assert_eq!(change, Money::from_cents(50));
/// assert!(compute_change(Money::from_cents(350), Money::from_cents(200)).is_err());
/// ```
pub fn compute_change(due: Money, tendered: Money) -> CoreResult<Money> {
    let change = tendered - due;
    if change.is_negative() {
        return Err(CoreError::InsufficientPayment { due, tendered });
    }
    Ok(change)
}

/// Amount still missing when the tender falls short (zero when covered).
pub fn shortfall(due: Money, tendered: Money) -> Money {
    if tendered >= due {
        Money::zero()
    } else {
        due - tendered
    }
}

/// Assembles the transaction record for a settled sale.
///
/// Quantities follow catalog order and carry a zero for every code not in
/// the ledger. The sum of quantities always equals the ledger length.
pub fn build_record(
    catalog: &Catalog,
    ledger: &LineItemLedger,
    tender: &CashTender,
    now: DateTime<Utc>,
) -> TransactionRecord {
    let mut counted = ledger.quantities();

    let mut quantities: Vec<CodeQuantity> = catalog
        .codes()
        .into_iter()
        .map(|code| {
            let quantity = counted.remove(&code).unwrap_or(0);
            CodeQuantity { code, quantity }
        })
        .collect();

    // A code that left the catalog mid-sale still has to be accounted for.
    quantities.extend(
        counted
            .into_iter()
            .map(|(code, quantity)| CodeQuantity { code, quantity }),
    );

    TransactionRecord {
        id: Uuid::new_v4().to_string(),
        recorded_at: now,
        bill_total: ledger.subtotal(),
        cash_tendered: tender.total(),
        quantities,
    }
}

/// Receipt for a committed record.
pub fn receipt(record: &TransactionRecord, sold_counts: Vec<SoldCount>) -> SettlementReceipt {
    SettlementReceipt {
        record_id: record.id.clone(),
        bill_total: record.bill_total,
        cash_tendered: record.cash_tendered,
        change: record.change(),
        sold_counts,
    }
}
