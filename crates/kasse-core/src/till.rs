//! # Till: The Transaction State Machine
//!
//! Gates every operator action by the phase of the current sale and makes
//! the settle-or-rollback decision.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            item_tapped                 enter_tender                     │
//! │   ┌──────┐ ──────────► ┌─────────┐ ─────────────────► ┌───────────┐    │
//! │   │ Idle │             │ Ringing │                    │ Tendering │◄─┐ │
//! │   └──────┘ ◄────────── └─────────┘                    └───────────┘  │ │
//! │      ▲  ▲   clear_ledger    │ ▲ item_tapped             │  │  │       │ │
//! │      │  │   cancel          └─┘                         │  │  │ denom │ │
//! │      │  │                                               │  │  └───────┘ │
//! │      │  └──────────────── cancel ───────────────────────┘  │ confirm   │
//! │      │                                                     │ (funds ok,│
//! │      └──────────────── confirm (stored) ───────────────────┤  store    │
//! │                                                            │  failed)  │
//! │                              ┌───────┐ ◄───────────────────┘           │
//! │                              │ Fault │ ── acknowledge ──► Tendering    │
//! │                              └───────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Confirm with too little cash renders an insufficient-funds banner and
//! stays in `Tendering`. Nothing reaches storage unless change >= 0.
//!
//! ## Ownership
//! One `Till` owns the whole session: catalog, ledger, tender, the storage
//! gateway and the presenter. Intents are handled one at a time through
//! `&mut self`, so a settlement always completes before the next tap.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::denomination::Denomination;
use crate::error::{CoreError, CoreResult};
use crate::gateway::{DisplayUpdate, PersistenceGateway, Presenter, View};
use crate::ledger::LineItemLedger;
use crate::money::Money;
use crate::settlement::{build_record, compute_change, receipt, shortfall};
use crate::tender::CashTender;
use crate::types::{LineItem, SettlementReceipt};

// =============================================================================
// Phase
// =============================================================================

/// Where the current sale stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No sale open. The last change amount may still be on screen.
    Idle,
    /// Items are being rung up.
    Ringing,
    /// Cash pad is open.
    Tendering,
    /// Storing the sale failed; waiting for the operator to acknowledge.
    Fault,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Ringing => "ringing",
            Phase::Tendering => "tendering",
            Phase::Fault => "fault",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Intent
// =============================================================================

/// An operator action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    ItemTapped { code: String },
    DenominationTapped { denomination: Denomination },
    EnterTender,
    Confirm,
    Cancel,
    ClearCash,
    ClearLedger,
    Acknowledge,
}

impl Intent {
    /// Stable name used in logs and transition errors.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::ItemTapped { .. } => "item_tapped",
            Intent::DenominationTapped { .. } => "denomination_tapped",
            Intent::EnterTender => "enter_tender",
            Intent::Confirm => "confirm",
            Intent::Cancel => "cancel",
            Intent::ClearCash => "clear_cash",
            Intent::ClearLedger => "clear_ledger",
            Intent::Acknowledge => "acknowledge",
        }
    }
}

// =============================================================================
// Till
// =============================================================================

/// The register session.
pub struct Till<G, P> {
    catalog: Catalog,
    ledger: LineItemLedger,
    tender: CashTender,
    phase: Phase,
    gateway: G,
    presenter: P,
    change_showing: bool,
    last_receipt: Option<SettlementReceipt>,
    fault: Option<String>,
}

impl<G, P> Till<G, P>
where
    G: PersistenceGateway,
    P: Presenter,
{
    /// Starts a session over an already loaded catalog.
    pub fn new(catalog: Catalog, gateway: G, presenter: P) -> Self {
        let mut till = Till {
            catalog,
            ledger: LineItemLedger::new(),
            tender: CashTender::new(),
            phase: Phase::Idle,
            gateway,
            presenter,
            change_showing: false,
            last_receipt: None,
            fault: None,
        };

        till.render(DisplayUpdate::View {
            view: View::ItemSelection,
        });
        till.render(DisplayUpdate::Subtotal {
            amount: Money::zero(),
        });
        till.render(DisplayUpdate::TenderEnabled { enabled: false });
        till
    }

    /// Loads the catalog through the gateway and starts a session.
    ///
    /// ## Errors
    /// - `MalformedCatalogRow` if a stored row is not a valid item
    /// - `Persistence` if storage cannot be read
    pub async fn open(gateway: G, presenter: P) -> CoreResult<Self> {
        let items = gateway.load_catalog().await?;
        let catalog = Catalog::new(items)?;
        info!(items = catalog.len(), "Till session opened");
        Ok(Till::new(catalog, gateway, presenter))
    }

    /// Dispatches one operator intent and returns the resulting phase.
    pub async fn handle(&mut self, intent: Intent) -> CoreResult<Phase> {
        let name = intent.name();
        let before = self.phase;

        let result = match intent {
            Intent::ItemTapped { code } => self.add_item(&code),
            Intent::DenominationTapped { denomination } => self.add_cash(denomination),
            Intent::EnterTender => self.enter_tender(),
            Intent::Confirm => self.confirm().await.map(|_| ()),
            Intent::Cancel => self.cancel(),
            Intent::ClearCash => self.clear_cash(),
            Intent::ClearLedger => self.clear_ledger(),
            Intent::Acknowledge => self.acknowledge(),
        };

        match result {
            Ok(()) => {
                debug!(intent = name, from = %before, to = %self.phase, "Intent accepted");
                Ok(self.phase)
            }
            Err(e) => {
                warn!(intent = name, phase = %self.phase, error = %e, "Intent rejected");
                Err(e)
            }
        }
    }

    // =========================================================================
    // Ringing
    // =========================================================================

    /// Rings up one unit of `code`.
    pub fn add_item(&mut self, code: &str) -> CoreResult<()> {
        self.require("item_tapped", &[Phase::Idle, Phase::Ringing])?;

        let item = self
            .catalog
            .get(code)
            .ok_or_else(|| CoreError::UnknownItem(code.to_string()))?;
        let line = LineItem::from_item(item);
        self.ledger.add(line.clone())?;

        if self.change_showing {
            self.dismiss_change();
        }
        self.phase = Phase::Ringing;

        self.render(DisplayUpdate::LineAdded {
            name: line.name,
            unit_price: line.unit_price,
        });
        self.render(DisplayUpdate::Subtotal {
            amount: self.ledger.subtotal(),
        });
        self.render(DisplayUpdate::TenderEnabled { enabled: true });
        Ok(())
    }

    /// Empties the sale without leaving the item pad.
    pub fn clear_ledger(&mut self) -> CoreResult<()> {
        self.require("clear_ledger", &[Phase::Idle, Phase::Ringing])?;

        if self.change_showing {
            self.change_showing = false;
            self.render(DisplayUpdate::ChangeDismissed);
        }
        self.ledger.clear();
        self.phase = Phase::Idle;

        self.render(DisplayUpdate::LedgerCleared);
        self.render(DisplayUpdate::Subtotal {
            amount: Money::zero(),
        });
        self.render(DisplayUpdate::TenderEnabled { enabled: false });
        Ok(())
    }

    /// Opens the cash pad.
    pub fn enter_tender(&mut self) -> CoreResult<()> {
        if matches!(self.phase, Phase::Idle | Phase::Ringing) && self.ledger.is_empty() {
            return Err(CoreError::EmptyLedger);
        }
        self.require("enter_tender", &[Phase::Ringing])?;

        self.tender.reset();
        self.phase = Phase::Tendering;

        self.render(DisplayUpdate::View {
            view: View::CashPad,
        });
        self.render(DisplayUpdate::CashTotal {
            amount: self.tender.total(),
        });
        Ok(())
    }

    // =========================================================================
    // Tendering
    // =========================================================================

    /// Counts in one coin or note.
    pub fn add_cash(&mut self, denomination: Denomination) -> CoreResult<()> {
        self.require("denomination_tapped", &[Phase::Tendering])?;

        self.tender.add(denomination);
        self.render(DisplayUpdate::CashTotal {
            amount: self.tender.total(),
        });
        Ok(())
    }

    /// Zeroes the counted cash.
    pub fn clear_cash(&mut self) -> CoreResult<()> {
        self.require("clear_cash", &[Phase::Tendering])?;

        self.tender.reset();
        self.render(DisplayUpdate::CashTotal {
            amount: Money::zero(),
        });
        Ok(())
    }

    /// Settles the sale.
    ///
    /// ## Outcomes
    /// - Too little cash: banner rendered, `InsufficientPayment`, still tendering
    /// - Stored: change rendered, sale cleared, back to idle
    /// - Storage failed: nothing stored, sale kept, till enters `Fault`
    pub async fn confirm(&mut self) -> CoreResult<SettlementReceipt> {
        self.require("confirm", &[Phase::Tendering])?;

        let due = self.ledger.subtotal();
        let tendered = self.tender.total();

        let change = match compute_change(due, tendered) {
            Ok(change) => change,
            Err(e) => {
                self.render(DisplayUpdate::InsufficientFunds {
                    due,
                    tendered,
                    shortfall: shortfall(due, tendered),
                });
                return Err(e);
            }
        };

        let record = build_record(&self.catalog, &self.ledger, &self.tender, Utc::now());

        let sold_counts = match self.gateway.commit_settlement(&record).await {
            Ok(counts) => counts,
            Err(e) => {
                error!(record_id = %record.id, error = %e, "Settlement could not be stored");
                let message = e.to_string();
                self.phase = Phase::Fault;
                self.fault = Some(message.clone());
                self.render(DisplayUpdate::Fault { message });
                return Err(match e {
                    CoreError::Persistence(_) => e,
                    other => CoreError::Persistence(other.to_string()),
                });
            }
        };

        info!(
            record_id = %record.id,
            bill_total = %record.bill_total,
            cash_tendered = %record.cash_tendered,
            change = %change,
            items = self.ledger.len(),
            "Sale settled"
        );

        self.catalog.apply_sold_counts(&sold_counts);
        let receipt = receipt(&record, sold_counts);

        self.ledger.clear();
        self.tender.reset();
        self.phase = Phase::Idle;
        self.change_showing = true;
        self.last_receipt = Some(receipt.clone());

        self.render(DisplayUpdate::ChangeDue { amount: change });
        self.render(DisplayUpdate::TenderEnabled { enabled: false });
        self.render(DisplayUpdate::View {
            view: View::ItemSelection,
        });
        Ok(receipt)
    }

    /// Abandons the sale. Nothing is stored.
    pub fn cancel(&mut self) -> CoreResult<()> {
        self.require("cancel", &[Phase::Ringing, Phase::Tendering])?;

        let discarded = self.ledger.len();
        self.ledger.clear();
        self.tender.reset();
        self.phase = Phase::Idle;
        info!(discarded, "Sale cancelled");

        self.render(DisplayUpdate::LedgerCleared);
        self.render(DisplayUpdate::Subtotal {
            amount: Money::zero(),
        });
        self.render(DisplayUpdate::TenderEnabled { enabled: false });
        self.render(DisplayUpdate::View {
            view: View::ItemSelection,
        });
        Ok(())
    }

    // =========================================================================
    // Fault
    // =========================================================================

    /// Dismisses a storage fault and reopens the cash pad with the sale intact.
    pub fn acknowledge(&mut self) -> CoreResult<()> {
        self.require("acknowledge", &[Phase::Fault])?;

        self.fault = None;
        self.phase = Phase::Tendering;

        self.render(DisplayUpdate::FaultCleared);
        self.render(DisplayUpdate::View {
            view: View::CashPad,
        });
        self.render(DisplayUpdate::CashTotal {
            amount: self.tender.total(),
        });
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &LineItemLedger {
        &self.ledger
    }

    pub fn tender(&self) -> &CashTender {
        &self.tender
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Receipt of the most recent settlement in this session.
    pub fn last_receipt(&self) -> Option<&SettlementReceipt> {
        self.last_receipt.as_ref()
    }

    /// Message of the pending fault, if any.
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn require(&self, intent: &'static str, allowed: &[Phase]) -> CoreResult<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                intent,
                phase: self.phase,
            })
        }
    }

    fn dismiss_change(&mut self) {
        self.change_showing = false;
        self.render(DisplayUpdate::ChangeDismissed);
        self.render(DisplayUpdate::LedgerCleared);
    }

    fn render(&mut self, update: DisplayUpdate) {
        self.presenter.render(update);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogItem, SoldCount, TransactionRecord};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    // -------------------------------------------------------------------------
    // Test doubles
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct MemoryGateway {
        items: Vec<CatalogItem>,
        sold: Mutex<HashMap<String, i64>>,
        log: Mutex<Vec<TransactionRecord>>,
        commits: AtomicUsize,
        fail_commits: AtomicBool,
    }

    impl MemoryGateway {
        fn with_items(items: Vec<CatalogItem>) -> Self {
            let sold = items
                .iter()
                .map(|item| (item.code.to_string(), item.sold_count))
                .collect();
            MemoryGateway {
                items,
                sold: Mutex::new(sold),
                ..Default::default()
            }
        }

        fn sold(&self, code: &str) -> i64 {
            self.sold.lock().unwrap().get(code).copied().unwrap_or(0)
        }

        fn records(&self) -> Vec<TransactionRecord> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PersistenceGateway for MemoryGateway {
        async fn load_catalog(&self) -> CoreResult<Vec<CatalogItem>> {
            Ok(self.items.clone())
        }

        async fn read_sold_count(&self, code: &str) -> CoreResult<i64> {
            Ok(self.sold(code))
        }

        async fn increment_sold(&self, code: &str, by: i64) -> CoreResult<i64> {
            let mut sold = self.sold.lock().unwrap();
            let value = sold.entry(code.to_string()).or_insert(0);
            *value += by;
            Ok(*value)
        }

        async fn append_transaction(&self, record: &TransactionRecord) -> CoreResult<()> {
            self.log.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn commit_settlement(
            &self,
            record: &TransactionRecord,
        ) -> CoreResult<Vec<SoldCount>> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            if self.fail_commits.load(Ordering::SeqCst) {
                return Err(CoreError::Persistence("disk I/O error".to_string()));
            }

            let mut counts = Vec::new();
            for line in record.touched() {
                let current = self.read_sold_count(line.code.as_str()).await?;
                let sold = self
                    .increment_sold(line.code.as_str(), line.quantity)
                    .await?;
                assert_eq!(sold, current + line.quantity);
                counts.push(SoldCount {
                    code: line.code.clone(),
                    sold,
                });
            }
            self.append_transaction(record).await?;
            Ok(counts)
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        updates: Vec<DisplayUpdate>,
    }

    impl Presenter for RecordingPresenter {
        fn render(&mut self, update: DisplayUpdate) {
            self.updates.push(update);
        }
    }

    impl RecordingPresenter {
        fn last_matching(&self, pred: impl Fn(&DisplayUpdate) -> bool) -> Option<&DisplayUpdate> {
            self.updates.iter().rev().find(|u| pred(u))
        }
    }

    fn soup_stand() -> Vec<CatalogItem> {
        vec![
            CatalogItem::try_new(1, "Soup", "SP", 350, 10).unwrap(),
            CatalogItem::try_new(2, "Bratwurst", "BW", 300, 4).unwrap(),
            CatalogItem::try_new(3, "Coffee", "KF", 150, 0).unwrap(),
        ]
    }

    async fn open_till() -> Till<MemoryGateway, RecordingPresenter> {
        Till::open(
            MemoryGateway::with_items(soup_stand()),
            RecordingPresenter::default(),
        )
        .await
        .unwrap()
    }

    // -------------------------------------------------------------------------
    // Scenarios
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_scenario_exact_sale_with_change() {
        let mut till = open_till().await;

        till.handle(Intent::ItemTapped { code: "SP".into() }).await.unwrap();
        till.handle(Intent::ItemTapped { code: "SP".into() }).await.unwrap();
        assert_eq!(till.ledger().subtotal(), Money::from_cents(700));

        till.handle(Intent::EnterTender).await.unwrap();
        for denomination in [Denomination::Euro5, Denomination::Euro2, Denomination::Cent50] {
            till.handle(Intent::DenominationTapped { denomination })
                .await
                .unwrap();
        }
        assert_eq!(till.tender().total(), Money::from_cents(750));

        let phase = till.handle(Intent::Confirm).await.unwrap();
        assert_eq!(phase, Phase::Idle);

        let receipt = till.last_receipt().unwrap();
        assert_eq!(receipt.change, Money::from_cents(50));

        let records = till.gateway().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity_of("SP"), 2);
        assert_eq!(records[0].quantity_of("BW"), 0);
        assert_eq!(till.gateway().sold("SP"), 12);
        assert_eq!(till.catalog().get("SP").unwrap().sold_count, 12);

        assert!(till.ledger().is_empty());
        assert!(till.tender().total().is_zero());
        assert_eq!(
            till.presenter().last_matching(|u| matches!(u, DisplayUpdate::ChangeDue { .. })),
            Some(&DisplayUpdate::ChangeDue {
                amount: Money::from_cents(50)
            })
        );
        assert_eq!(
            till.presenter().updates.last(),
            Some(&DisplayUpdate::View {
                view: View::ItemSelection
            })
        );
    }

    #[tokio::test]
    async fn test_scenario_insufficient_then_topped_up() {
        let mut till = open_till().await;

        till.handle(Intent::ItemTapped { code: "SP".into() }).await.unwrap();
        till.handle(Intent::EnterTender).await.unwrap();
        till.handle(Intent::DenominationTapped {
            denomination: Denomination::Euro2,
        })
        .await
        .unwrap();

        let err = till.handle(Intent::Confirm).await.unwrap_err();
        assert!(matches!(err, CoreError::InsufficientPayment { .. }));
        assert_eq!(till.phase(), Phase::Tendering);
        assert_eq!(till.ledger().len(), 1);
        assert_eq!(till.tender().total(), Money::from_cents(200));
        assert_eq!(till.gateway().commits.load(Ordering::SeqCst), 0);
        assert_eq!(
            till.presenter().updates.last(),
            Some(&DisplayUpdate::InsufficientFunds {
                due: Money::from_cents(350),
                tendered: Money::from_cents(200),
                shortfall: Money::from_cents(150),
            })
        );

        till.handle(Intent::DenominationTapped {
            denomination: Denomination::Euro2,
        })
        .await
        .unwrap();
        let receipt = till.confirm().await.unwrap();

        assert_eq!(receipt.change, Money::from_cents(50));
        assert_eq!(till.phase(), Phase::Idle);
        assert_eq!(till.gateway().records().len(), 1);
    }

    #[tokio::test]
    async fn test_scenario_cancel_before_tender() {
        let mut till = open_till().await;

        till.handle(Intent::ItemTapped { code: "SP".into() }).await.unwrap();
        till.handle(Intent::ItemTapped { code: "BW".into() }).await.unwrap();
        till.handle(Intent::Cancel).await.unwrap();

        assert_eq!(till.phase(), Phase::Idle);
        assert!(till.ledger().is_empty());
        assert!(till.tender().total().is_zero());
        assert_eq!(till.gateway().commits.load(Ordering::SeqCst), 0);
        assert!(till.gateway().records().is_empty());
        assert_eq!(till.gateway().sold("SP"), 10);
        assert_eq!(till.gateway().sold("BW"), 4);
    }

    #[tokio::test]
    async fn test_storage_failure_faults_and_keeps_sale() {
        let mut till = open_till().await;
        till.gateway().fail_commits.store(true, Ordering::SeqCst);

        till.handle(Intent::ItemTapped { code: "KF".into() }).await.unwrap();
        till.handle(Intent::EnterTender).await.unwrap();
        till.handle(Intent::DenominationTapped {
            denomination: Denomination::Euro2,
        })
        .await
        .unwrap();

        let err = till.handle(Intent::Confirm).await.unwrap_err();
        assert!(matches!(err, CoreError::Persistence(_)));
        assert_eq!(till.phase(), Phase::Fault);
        assert!(till.fault().is_some());
        assert_eq!(till.ledger().len(), 1);
        assert_eq!(till.tender().total(), Money::from_cents(200));
        assert!(till.gateway().records().is_empty());
        assert_eq!(till.gateway().sold("KF"), 0);

        // Only acknowledge gets through while faulted.
        let err = till.handle(Intent::Cancel).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));

        till.handle(Intent::Acknowledge).await.unwrap();
        assert_eq!(till.phase(), Phase::Tendering);
        assert!(till.fault().is_none());

        till.gateway().fail_commits.store(false, Ordering::SeqCst);
        let receipt = till.confirm().await.unwrap();
        assert_eq!(receipt.change, Money::from_cents(50));
        assert_eq!(till.gateway().sold("KF"), 1);
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_invalid_transitions_change_nothing() {
        let mut till = open_till().await;

        let err = till
            .handle(Intent::DenominationTapped {
                denomination: Denomination::Euro1,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTransition {
                phase: Phase::Idle,
                ..
            }
        ));
        assert!(matches!(
            till.handle(Intent::Confirm).await,
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            till.handle(Intent::Cancel).await,
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            till.handle(Intent::Acknowledge).await,
            Err(CoreError::InvalidTransition { .. })
        ));

        till.handle(Intent::ItemTapped { code: "SP".into() }).await.unwrap();
        till.handle(Intent::EnterTender).await.unwrap();
        assert!(matches!(
            till.handle(Intent::ItemTapped { code: "SP".into() }).await,
            Err(CoreError::InvalidTransition {
                phase: Phase::Tendering,
                ..
            })
        ));
        assert_eq!(till.ledger().len(), 1);
        assert_eq!(till.phase(), Phase::Tendering);
    }

    #[tokio::test]
    async fn test_tender_requires_items() {
        let mut till = open_till().await;
        assert!(matches!(
            till.handle(Intent::EnterTender).await,
            Err(CoreError::EmptyLedger)
        ));
        assert_eq!(till.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_unknown_item_is_rejected() {
        let mut till = open_till().await;
        let err = till
            .handle(Intent::ItemTapped { code: "XX".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownItem(code) if code == "XX"));
        assert_eq!(till.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_item_codes_are_case_insensitive() {
        let mut till = open_till().await;
        till.handle(Intent::ItemTapped { code: "sp".into() }).await.unwrap();
        assert_eq!(till.ledger().entries()[0].code.as_str(), "SP");
    }

    #[tokio::test]
    async fn test_clear_cash_and_clear_ledger() {
        let mut till = open_till().await;

        till.handle(Intent::ItemTapped { code: "BW".into() }).await.unwrap();
        till.handle(Intent::ClearLedger).await.unwrap();
        assert_eq!(till.phase(), Phase::Idle);
        assert!(till.ledger().is_empty());
        assert_eq!(
            till.presenter().updates.last(),
            Some(&DisplayUpdate::TenderEnabled { enabled: false })
        );

        till.handle(Intent::ItemTapped { code: "BW".into() }).await.unwrap();
        till.handle(Intent::EnterTender).await.unwrap();
        till.handle(Intent::DenominationTapped {
            denomination: Denomination::Euro50,
        })
        .await
        .unwrap();
        till.handle(Intent::ClearCash).await.unwrap();
        assert!(till.tender().total().is_zero());
        assert_eq!(till.phase(), Phase::Tendering);
        assert_eq!(
            till.presenter().updates.last(),
            Some(&DisplayUpdate::CashTotal {
                amount: Money::zero()
            })
        );
    }

    #[tokio::test]
    async fn test_cancel_while_tendering_restores_item_pad() {
        let mut till = open_till().await;

        till.handle(Intent::ItemTapped { code: "SP".into() }).await.unwrap();
        till.handle(Intent::EnterTender).await.unwrap();
        till.handle(Intent::DenominationTapped {
            denomination: Denomination::Euro5,
        })
        .await
        .unwrap();
        till.handle(Intent::Cancel).await.unwrap();

        assert_eq!(till.phase(), Phase::Idle);
        assert!(till.ledger().is_empty());
        assert!(till.tender().total().is_zero());
        assert_eq!(
            till.presenter().updates.last(),
            Some(&DisplayUpdate::View {
                view: View::ItemSelection
            })
        );
    }

    #[tokio::test]
    async fn test_change_stays_until_next_tap() {
        let mut till = open_till().await;

        till.handle(Intent::ItemTapped { code: "KF".into() }).await.unwrap();
        till.handle(Intent::EnterTender).await.unwrap();
        till.handle(Intent::DenominationTapped {
            denomination: Denomination::Euro2,
        })
        .await
        .unwrap();
        till.handle(Intent::Confirm).await.unwrap();
        assert!(!till
            .presenter()
            .updates
            .contains(&DisplayUpdate::ChangeDismissed));

        till.handle(Intent::ItemTapped { code: "SP".into() }).await.unwrap();
        assert!(till
            .presenter()
            .updates
            .contains(&DisplayUpdate::ChangeDismissed));
        assert_eq!(till.ledger().len(), 1);
    }

    #[tokio::test]
    async fn test_open_rejects_duplicate_codes() {
        let mut items = soup_stand();
        items.push(CatalogItem::try_new(4, "Soup of the day", "sp", 400, 0).unwrap());

        let result = Till::open(
            MemoryGateway::with_items(items),
            RecordingPresenter::default(),
        )
        .await;
        assert!(matches!(result, Err(CoreError::MalformedCatalogRow { .. })));
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn any_intent() -> impl Strategy<Value = Intent> {
        prop_oneof![
            prop_oneof![Just("SP"), Just("BW"), Just("KF"), Just("XX")]
                .prop_map(|code| Intent::ItemTapped { code: code.to_string() }),
            (0usize..Denomination::ALL.len()).prop_map(|i| Intent::DenominationTapped {
                denomination: Denomination::ALL[i]
            }),
            Just(Intent::EnterTender),
            Just(Intent::Confirm),
            Just(Intent::Cancel),
            Just(Intent::ClearCash),
            Just(Intent::ClearLedger),
            Just(Intent::Acknowledge),
        ]
    }

    proptest! {
        /// Storage only ever sees fully paid sales, and cancel always empties the sale.
        #[test]
        fn prop_only_paid_sales_are_stored(
            intents in proptest::collection::vec(any_intent(), 0..80)
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();

            runtime.block_on(async {
                let mut till = open_till().await;
                let mut settled = 0usize;

                for intent in intents {
                    let cancelling = intent == Intent::Cancel;
                    let confirming = intent == Intent::Confirm;
                    let due = till.ledger().subtotal();
                    let tendered = till.tender().total();

                    let result = till.handle(intent).await;

                    if cancelling && result.is_ok() {
                        prop_assert!(till.ledger().is_empty());
                        prop_assert!(till.tender().total().is_zero());
                    }
                    if confirming && result.is_ok() {
                        prop_assert!(tendered >= due);
                        settled += 1;
                    }
                }

                let records = till.gateway().records();
                prop_assert_eq!(records.len(), settled);
                for record in &records {
                    prop_assert!(!record.change().is_negative());
                    prop_assert!(record.total_quantity() > 0);
                }
                Ok(())
            })?;
        }
    }
}
