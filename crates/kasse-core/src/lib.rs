//! # kasse-core: Pure Register Logic for Kasse
//!
//! This crate is the **heart** of the food stand register. It holds the sale
//! state machine and all reconciliation arithmetic, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasse Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (apps/till, external UI)              │   │
//! │  │     Item pad ──► Running total ──► Cash pad ──► Change due      │   │
//! │  └───────────────┬─────────────────────────────▲───────────────────┘   │
//! │           Intent │                             │ DisplayUpdate          │
//! │  ┌───────────────▼─────────────────────────────┴───────────────────┐   │
//! │  │               ★ kasse-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   till    │  │  ledger   │  │  tender   │  │settlement │  │   │
//! │  │   │  phases   │  │ LineItems │  │ CashTender│  │  change   │  │   │
//! │  │   │  intents  │  │ subtotal  │  │ denoms    │  │  record   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └───────────────────────────────┬─────────────────────────────────┘   │
//! │                                  │ PersistenceGateway                   │
//! │  ┌───────────────────────────────▼─────────────────────────────────┐   │
//! │  │                  kasse-db (Database Layer)                      │   │
//! │  │          food_list, transaction_log, atomic settlement          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`denomination`] - The till's coin and note schedule
//! - [`types`] - Catalog items, line items, transaction records
//! - [`catalog`] - The per-session item catalog
//! - [`ledger`] - Items rung up in the current sale
//! - [`tender`] - Cash entered towards the current sale
//! - [`settlement`] - Change computation and record assembly
//! - [`gateway`] - Storage and display capability traits
//! - [`buttons`] - Tappable keypad buttons
//! - [`till`] - The transaction state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use kasse_core::{CashTender, Denomination, Money};
//!
//! let mut tender = CashTender::new();
//! tender.add(Denomination::Euro5);
//! tender.add(Denomination::Euro2);
//! tender.add(Denomination::Cent50);
//!
//! assert_eq!(tender.total(), Money::from_cents(750));
//! ```

pub mod buttons;
pub mod catalog;
pub mod denomination;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod money;
pub mod settlement;
pub mod tender;
pub mod till;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use buttons::{cash_pad, food_buttons, DenominationButton, FoodButton, Tappable};
pub use catalog::Catalog;
pub use denomination::Denomination;
pub use error::{CoreError, CoreResult, ValidationError};
pub use gateway::{DisplayUpdate, PersistenceGateway, Presenter, View};
pub use ledger::LineItemLedger;
pub use money::Money;
pub use tender::CashTender;
pub use till::{Intent, Phase, Till};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of taps a single sale may hold.
///
/// ## Business Reason
/// A food stand sale is a handful of items. The cap stops a stuck button or
/// a child leaning on the screen from growing the ledger without bound.
pub const MAX_LEDGER_ENTRIES: usize = 500;

/// Maximum length of an item short code.
///
/// Short codes double as transaction log column names, so they stay short.
pub const MAX_SHORT_CODE_LEN: usize = 16;
