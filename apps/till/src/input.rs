//! # Operator Input
//!
//! Turns one line of operator input into a command.
//!
//! ## Accepted Forms
//! ```text
//! 3                        tap button 3 of the pad on screen
//! item SP                  tap the item with short code SP
//! cash 0.50 | cash 20      tap a coin or note by value
//! tender                   open the cash pad
//! ok                       confirm payment
//! clear                    clear the sale (item pad) or the cash (cash pad)
//! cancel                   abandon the sale
//! ack                      acknowledge a storage fault
//! quit                     end the session
//! {"intent":"item_tapped","code":"SP"}    any intent as JSON
//! ```

use kasse_core::{Denomination, Intent, Money, View};

use crate::error::AppError;
use crate::state::Keypads;

/// What one input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Help,
    Quit,
}

/// Parses one line. Blank lines yield `Ok(None)`.
///
/// `view` is the pad on screen; it decides what a number and `clear` mean.
pub fn parse_line(line: &str, keypads: &Keypads, view: View) -> Result<Option<Command>, AppError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if line.starts_with('{') {
        let intent: Intent = serde_json::from_str(line)
            .map_err(|e| AppError::input(format!("Invalid intent JSON: {}", e)))?;
        return Ok(Some(Command::Intent(intent)));
    }

    if let Ok(number) = line.parse::<usize>() {
        let intent = keypads
            .tap(view, number)
            .ok_or_else(|| AppError::input(format!("No button {} on this pad", number)))?;
        return Ok(Some(Command::Intent(intent)));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "item" => {
            if rest.is_empty() {
                return Err(AppError::input("Usage: item CODE"));
            }
            Command::Intent(Intent::ItemTapped {
                code: rest.to_string(),
            })
        }
        "cash" => {
            let amount: Money = rest.parse()?;
            let denomination = Denomination::try_from(amount)?;
            Command::Intent(Intent::DenominationTapped { denomination })
        }
        "tender" | "pay" => Command::Intent(Intent::EnterTender),
        "ok" | "confirm" => Command::Intent(Intent::Confirm),
        "clear" => match view {
            View::ItemSelection => Command::Intent(Intent::ClearLedger),
            View::CashPad => Command::Intent(Intent::ClearCash),
        },
        "cancel" => Command::Intent(Intent::Cancel),
        "ack" => Command::Intent(Intent::Acknowledge),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(AppError::input(format!("Unknown command: {}", line))),
    };

    Ok(Some(command))
}
