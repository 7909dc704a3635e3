//! # Capability Traits
//!
//! The two seams between the till and the outside world.
//!
//! ```text
//! ┌──────────────┐  DisplayUpdate   ┌─────────────┐  TransactionRecord  ┌──────────────────┐
//! │  Presenter   │ ◄─────────────── │    Till     │ ──────────────────► │PersistenceGateway│
//! │ (terminal,   │                  │ (kasse-core)│                     │ (kasse-db sqlite,│
//! │  JSON, GUI)  │                  └─────────────┘                     │  test doubles)   │
//! └──────────────┘                                                      └──────────────────┘
//! ```
//!
//! Both are plain traits so tests can swap in in-memory doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{CatalogItem, SoldCount, TransactionRecord};

// =============================================================================
// Persistence
// =============================================================================

/// Storage operations the till needs.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Loads the catalog in row order.
    ///
    /// A row that cannot become a [`CatalogItem`] fails the whole load with
    /// `MalformedCatalogRow`.
    async fn load_catalog(&self) -> CoreResult<Vec<CatalogItem>>;

    /// Current persisted sold counter of `code`.
    async fn read_sold_count(&self, code: &str) -> CoreResult<i64>;

    /// Adds `by` to the sold counter of `code` and returns the new value.
    async fn increment_sold(&self, code: &str, by: i64) -> CoreResult<i64>;

    /// Appends one row to the transaction log.
    async fn append_transaction(&self, record: &TransactionRecord) -> CoreResult<()>;

    /// Commits a settled sale as a single unit.
    ///
    /// For every code the record touches: read the counter, then increment
    /// it. Then append the record. Either all of it is stored or none of it.
    /// Returns the new counter of every touched code.
    async fn commit_settlement(&self, record: &TransactionRecord) -> CoreResult<Vec<SoldCount>>;
}

// =============================================================================
// Presentation
// =============================================================================

/// Which keypad is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    ItemSelection,
    CashPad,
}

/// Everything the till asks a display to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayUpdate {
    /// Switch keypads.
    View { view: View },

    /// A line was rung up.
    LineAdded { name: String, unit_price: Money },

    /// The line list was emptied.
    LedgerCleared,

    /// Running bill total.
    Subtotal { amount: Money },

    /// Running cash total.
    CashTotal { amount: Money },

    /// Change to hand back; stays up until the next item tap.
    ChangeDue { amount: Money },

    /// The change display was dismissed.
    ChangeDismissed,

    /// The cash does not cover the bill.
    InsufficientFunds {
        due: Money,
        tendered: Money,
        shortfall: Money,
    },

    /// Whether the tender button accepts taps.
    TenderEnabled { enabled: bool },

    /// Blocking error; only acknowledge is accepted until cleared.
    Fault { message: String },

    FaultCleared,
}

/// Display side of the till.
pub trait Presenter: Send {
    fn render(&mut self, update: DisplayUpdate);
}
