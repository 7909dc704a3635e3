//! # Line Item Ledger
//!
//! Accumulates the taps of the sale in progress.
//!
//! ## Ledger Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  Operator Action          Till                    Ledger Change         │
//! │  ───────────────          ────                    ─────────────         │
//! │                                                                         │
//! │  Tap item ───────────────► add_item() ──────────► entries.push(item)   │
//! │                                                                         │
//! │  Tap "clear" ────────────► clear_ledger() ──────► entries.clear()      │
//! │                                                                         │
//! │  Settle / cancel ────────► confirm() / cancel() ► entries.clear()      │
//! │                                                                         │
//! │  NOTE: there is no single-entry removal. A mistyped item means          │
//! │        clearing the whole sale and ringing it up again.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, ShortCode};
use crate::MAX_LEDGER_ENTRIES;

/// Ordered taps of the current sale.
///
/// ## Invariants
/// - `subtotal()` equals the sum of all entries' unit prices
/// - `quantities()[code]` equals the number of entries with that code
/// - Same code may appear any number of times (repeat taps are separate entries)
#[derive(Debug, Clone, Default, Serialize)]
pub struct LineItemLedger {
    entries: Vec<LineItem>,
}

impl LineItemLedger {
    pub fn new() -> Self {
        LineItemLedger::default()
    }

    /// Appends a tap.
    ///
    /// ## Returns
    /// - `Err(LedgerFull)` once [`MAX_LEDGER_ENTRIES`] is reached
    pub fn add(&mut self, item: LineItem) -> CoreResult<()> {
        if self.entries.len() >= MAX_LEDGER_ENTRIES {
            return Err(CoreError::LedgerFull {
                max: MAX_LEDGER_ENTRIES,
            });
        }

        self.entries.push(item);
        Ok(())
    }

    /// Sum of unit prices. Recomputed on every call; sales are tens of items.
    pub fn subtotal(&self) -> Money {
        self.entries.iter().map(|entry| entry.unit_price).sum()
    }

    /// Count of entries per short code.
    pub fn quantities(&self) -> BTreeMap<ShortCode, i64> {
        let mut quantities = BTreeMap::new();
        for entry in &self.entries {
            *quantities.entry(entry.code.clone()).or_insert(0) += 1;
        }
        quantities
    }

    /// Entries in tap order.
    pub fn entries(&self) -> &[LineItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
