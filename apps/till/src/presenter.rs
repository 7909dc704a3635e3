//! # Terminal Presenter
//!
//! Renders till display updates to a writer (stdout in the kiosk).
//!
//! ## Output Modes
//! ```text
//! Text                                   JSON lines
//! ─────────────────────────────          ───────────────────────────────────────────
//! + Soup 3.50 €                          {"kind":"line_added","name":"Soup","unit_price":350}
//! TOTAL: 3.50 €                          {"kind":"subtotal","amount":350}
//! CASH: 2.00 €                           {"kind":"cash_total","amount":200}
//! NOT ENOUGH: 1.50 €                     {"kind":"insufficient_funds",...}
//! CHANGE: 0.50 €                         {"kind":"change_due","amount":50}
//! ```
//!
//! A failed write is logged and otherwise ignored; the till keeps working
//! and the sale is never affected by a broken display.

use kasse_core::{DisplayUpdate, Presenter, View};
use serde::Serialize;
use std::io::Write;
use tracing::warn;

use crate::error::AppError;
use crate::state::{ConfigState, Keypads, OutputMode};

/// [`Presenter`] writing text or JSON lines.
pub struct TerminalPresenter<W> {
    out: W,
    config: ConfigState,
    keypads: Keypads,
    view: View,
    tender_enabled: bool,
}

/// Error report in JSON mode.
#[derive(Serialize)]
struct ErrorLine<'a> {
    kind: &'static str,
    #[serde(flatten)]
    error: &'a AppError,
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W, config: ConfigState, keypads: Keypads) -> Self {
        TerminalPresenter {
            out,
            config,
            keypads,
            view: View::ItemSelection,
            tender_enabled: false,
        }
    }

    /// Pad currently on screen; numeric input taps its buttons.
    pub fn view(&self) -> View {
        self.view
    }

    pub fn tender_enabled(&self) -> bool {
        self.tender_enabled
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Session banner (text mode only).
    pub fn greet(&mut self) {
        if self.config.output == OutputMode::Text {
            let banner = format!(
                "=== {} ===\nType a button number, 'item CODE', 'cash 0.50', 'tender', 'ok', 'clear', 'cancel', 'ack' or 'quit'.",
                self.config.store_name
            );
            self.line(&banner);
        }
    }

    /// Reports a rejected operator line.
    pub fn report(&mut self, error: &AppError) {
        match self.config.output {
            OutputMode::Text => {
                let text = format!("! {}", error.message);
                self.line(&text);
            }
            OutputMode::Json => self.json(&ErrorLine {
                kind: "error",
                error,
            }),
        }
    }

    fn money(&self, amount: kasse_core::Money) -> String {
        self.config.format_currency(amount.cents())
    }

    fn pad(&self, view: View) -> String {
        let title = match view {
            View::ItemSelection => "ITEMS",
            View::CashPad => "CASH",
        };

        let buttons: Vec<String> = match view {
            View::ItemSelection => self
                .keypads
                .food()
                .iter()
                .enumerate()
                .map(|(i, b)| format!("[{}] {} {}", i + 1, b.name, self.money(b.unit_price)))
                .collect(),
            View::CashPad => self
                .keypads
                .labels(View::CashPad)
                .into_iter()
                .enumerate()
                .map(|(i, label)| format!("[{}] {}", i + 1, label))
                .collect(),
        };

        format!("-- {} --\n{}", title, buttons.join("  "))
    }

    fn text(&self, update: &DisplayUpdate) -> Option<String> {
        let labels = self.config.labels;
        let text = match update {
            DisplayUpdate::View { view } => self.pad(*view),
            DisplayUpdate::LineAdded { name, unit_price } => {
                format!("+ {} {}", name, self.money(*unit_price))
            }
            DisplayUpdate::LedgerCleared => "(sale cleared)".to_string(),
            DisplayUpdate::Subtotal { amount } => {
                format!("{}: {}", labels.total, self.money(*amount))
            }
            DisplayUpdate::CashTotal { amount } => {
                format!("{}: {}", labels.cash, self.money(*amount))
            }
            DisplayUpdate::ChangeDue { amount } => {
                format!("{}: {}", labels.change, self.money(*amount))
            }
            DisplayUpdate::InsufficientFunds { shortfall, .. } => {
                format!("{}: {}", labels.missing, self.money(*shortfall))
            }
            DisplayUpdate::Fault { message } => {
                format!("!! {} (type 'ack' to continue)", message)
            }
            DisplayUpdate::FaultCleared => "fault acknowledged".to_string(),
            DisplayUpdate::ChangeDismissed | DisplayUpdate::TenderEnabled { .. } => return None,
        };
        Some(text)
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Display write failed");
        }
    }

    fn json<T: Serialize>(&mut self, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(std::io::Error::from)
            .and_then(|json| writeln!(self.out, "{}", json))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!(error = %e, "Display write failed");
        }
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn render(&mut self, update: DisplayUpdate) {
        match &update {
            DisplayUpdate::View { view } => self.view = *view,
            DisplayUpdate::TenderEnabled { enabled } => self.tender_enabled = *enabled,
            _ => {}
        }

        match self.config.output {
            OutputMode::Text => {
                if let Some(text) = self.text(&update) {
                    self.line(&text);
                }
            }
            OutputMode::Json => self.json(&update),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DisplayLabels;
    use kasse_core::{Catalog, CatalogItem, Money};

    fn presenter(output: OutputMode) -> TerminalPresenter<Vec<u8>> {
        let catalog = Catalog::new(vec![CatalogItem::try_new(1, "Soup", "SP", 350, 0).unwrap()])
            .unwrap();
        let config = ConfigState {
            output,
            ..ConfigState::default()
        };
        TerminalPresenter::new(Vec::new(), config, Keypads::new(&catalog))
    }

    fn output(presenter: &TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.get_ref().clone()).unwrap()
    }

    #[test]
    fn test_text_lines() {
        let mut p = presenter(OutputMode::Text);
        p.render(DisplayUpdate::LineAdded {
            name: "Soup".to_string(),
            unit_price: Money::from_cents(350),
        });
        p.render(DisplayUpdate::Subtotal {
            amount: Money::from_cents(700),
        });
        p.render(DisplayUpdate::CashTotal {
            amount: Money::from_cents(750),
        });
        p.render(DisplayUpdate::ChangeDue {
            amount: Money::from_cents(50),
        });
        p.render(DisplayUpdate::TenderEnabled { enabled: true });

        assert_eq!(
            output(&p),
            "+ Soup 3.50 €\nTOTAL: 7.00 €\nCASH: 7.50 €\nCHANGE: 0.50 €\n"
        );
        assert!(p.tender_enabled());
    }

    #[test]
    fn test_insufficient_banner() {
        let mut p = presenter(OutputMode::Text);
        p.render(DisplayUpdate::InsufficientFunds {
            due: Money::from_cents(350),
            tendered: Money::from_cents(200),
            shortfall: Money::from_cents(150),
        });
        assert_eq!(output(&p), "NOT ENOUGH: 1.50 €\n");
    }

    #[test]
    fn test_german_labels() {
        let catalog = Catalog::new(vec![CatalogItem::try_new(1, "Suppe", "SP", 350, 0).unwrap()])
            .unwrap();
        let config = ConfigState {
            labels: DisplayLabels::german(),
            ..ConfigState::default()
        };
        let mut p = TerminalPresenter::new(Vec::new(), config, Keypads::new(&catalog));

        p.render(DisplayUpdate::Subtotal {
            amount: Money::from_cents(700),
        });
        p.render(DisplayUpdate::CashTotal {
            amount: Money::from_cents(750),
        });
        p.render(DisplayUpdate::ChangeDue {
            amount: Money::from_cents(50),
        });

        assert_eq!(output(&p), "SUMME: 7.00 €\nBAR: 7.50 €\nZURÜCK: 0.50 €\n");
    }

    #[test]
    fn test_view_switch_prints_pad_and_tracks_view() {
        let mut p = presenter(OutputMode::Text);
        p.render(DisplayUpdate::View {
            view: View::CashPad,
        });

        assert_eq!(p.view(), View::CashPad);
        let out = output(&p);
        assert!(out.starts_with("-- CASH --"));
        assert!(out.contains("[13] 100 €"));
    }

    #[test]
    fn test_json_lines() {
        let mut p = presenter(OutputMode::Json);
        p.render(DisplayUpdate::Subtotal {
            amount: Money::from_cents(700),
        });
        p.report(&AppError::input("Unknown command: foo"));

        let out = output(&p);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0], serde_json::json!({ "kind": "subtotal", "amount": 700 }));
        assert_eq!(lines[1]["kind"], "error");
        assert_eq!(lines[1]["code"], "INVALID_INPUT");
    }
}
