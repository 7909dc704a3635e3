//! # Session Loop
//!
//! Reads operator lines and feeds them to the till, strictly one at a time.
//!
//! ```text
//! line ──► parse_line ──► Till::handle(intent).await ──► next line
//!              │                    │
//!              └── Err ──► report   └── Err ──► report (unless the till
//!                                               already rendered it)
//! ```
//!
//! Each intent, settlement included, is awaited before the next line is
//! read, so a tap can never overtake a sale that is still being stored.

use kasse_core::{CoreError, Intent, PersistenceGateway, Till};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::error::AppError;
use crate::input::{parse_line, Command};
use crate::presenter::TerminalPresenter;
use crate::state::Keypads;

/// Counters reported when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines: usize,
    pub settled: usize,
    pub rejected: usize,
}

/// Runs until `quit` or end of input.
pub async fn run_session<G, W, R>(
    till: &mut Till<G, TerminalPresenter<W>>,
    keypads: &Keypads,
    mut input: R,
) -> Result<SessionSummary, AppError>
where
    G: PersistenceGateway,
    W: Write + Send,
    R: AsyncBufRead + Unpin,
{
    let mut summary = SessionSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        summary.lines += 1;

        // A garbled line is one bad tap, not the end of the session.
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(&['\r', '\n'][..]),
            Err(e) => {
                debug!(error = %e, "Input line is not UTF-8");
                summary.rejected += 1;
                till.presenter_mut()
                    .report(&AppError::input("Input line is not valid text"));
                continue;
            }
        };

        let view = till.presenter().view();
        let command = match parse_line(line, keypads, view) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                debug!(line = %line, error = %e, "Unreadable input");
                summary.rejected += 1;
                till.presenter_mut().report(&e);
                continue;
            }
        };

        let intent = match command {
            Command::Intent(intent) => intent,
            Command::Help => {
                till.presenter_mut().greet();
                continue;
            }
            Command::Quit => break,
        };

        let confirming = intent == Intent::Confirm;
        match till.handle(intent).await {
            Ok(_) => {
                if confirming {
                    summary.settled += 1;
                }
            }
            Err(e) => {
                summary.rejected += 1;
                // Both already have their own display update.
                let rendered = matches!(
                    e,
                    CoreError::InsufficientPayment { .. } | CoreError::Persistence(_)
                );
                if !rendered {
                    till.presenter_mut().report(&AppError::from(e));
                }
            }
        }
    }

    info!(
        lines = summary.lines,
        settled = summary.settled,
        rejected = summary.rejected,
        "Session ended"
    );
    Ok(summary)
}
