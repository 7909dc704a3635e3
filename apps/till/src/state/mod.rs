//! # State Module
//!
//! Session-wide state that lives outside the till itself.
//!
//! The `Till` owns everything about the sale in progress. What stays here
//! is read-only after startup: configuration and the keypad layout.

mod config;
mod keypads;

pub use config::{ConfigState, DisplayLabels, OutputMode, SymbolPosition};
pub use keypads::Keypads;
