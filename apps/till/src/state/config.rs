//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`KASSE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct ConfigState {
    /// Store name (shown in the session banner)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Whether the symbol goes before or after the amount
    pub symbol_position: SymbolPosition,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Human text or JSON lines on stdout
    pub output: OutputMode,

    /// Captions of the text display
    pub labels: DisplayLabels,

    /// Database file override; platform data dir when unset
    pub db_path: Option<PathBuf>,
}

/// Where the currency symbol is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$7.00`
    Before,

    /// `7.00 €`
    #[default]
    After,
}

/// Display format of the terminal presenter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Readable lines for an operator at a terminal
    #[default]
    Text,

    /// One JSON object per display update, for an external UI process
    Json,
}

/// Captions printed in front of amounts in text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLabels {
    pub total: &'static str,
    pub cash: &'static str,
    pub change: &'static str,
    pub missing: &'static str,
}

impl DisplayLabels {
    pub const fn english() -> Self {
        DisplayLabels {
            total: "TOTAL",
            cash: "CASH",
            change: "CHANGE",
            missing: "NOT ENOUGH",
        }
    }

    /// German captions (`KASSE_LABELS=de`).
    pub const fn german() -> Self {
        DisplayLabels {
            total: "SUMME",
            cash: "BAR",
            change: "ZURÜCK",
            missing: "FEHLT",
        }
    }
}

impl Default for DisplayLabels {
    fn default() -> Self {
        DisplayLabels::english()
    }
}

impl Default for ConfigState {
    /// Returns defaults for the food stand: euro, symbol after the amount,
    /// text output, platform database path.
    fn default() -> Self {
        ConfigState {
            store_name: "Kasse Food Stand".to_string(),
            currency_symbol: "€".to_string(),
            symbol_position: SymbolPosition::After,
            currency_decimals: 2,
            output: OutputMode::Text,
            labels: DisplayLabels::english(),
            db_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `KASSE_STORE_NAME`: Override store name
    /// - `KASSE_CURRENCY_SYMBOL`: Override currency symbol
    /// - `KASSE_SYMBOL_POSITION`: `before` or `after`
    /// - `KASSE_OUTPUT`: `text` or `json`
    /// - `KASSE_LABELS`: `en` or `de`
    /// - `KASSE_DB_PATH`: Database file path
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("KASSE_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("KASSE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(position) = lookup("KASSE_SYMBOL_POSITION") {
            match position.trim().to_ascii_lowercase().as_str() {
                "before" => config.symbol_position = SymbolPosition::Before,
                "after" => config.symbol_position = SymbolPosition::After,
                other => tracing::warn!(value = %other, "Ignoring unknown KASSE_SYMBOL_POSITION"),
            }
        }

        if let Some(output) = lookup("KASSE_OUTPUT") {
            match output.trim().to_ascii_lowercase().as_str() {
                "json" => config.output = OutputMode::Json,
                "text" => config.output = OutputMode::Text,
                other => tracing::warn!(value = %other, "Ignoring unknown KASSE_OUTPUT"),
            }
        }

        if let Some(labels) = lookup("KASSE_LABELS") {
            match labels.trim().to_ascii_lowercase().as_str() {
                "en" => config.labels = DisplayLabels::english(),
                "de" => config.labels = DisplayLabels::german(),
                other => tracing::warn!(value = %other, "Ignoring unknown KASSE_LABELS"),
            }
        }

        if let Some(path) = lookup("KASSE_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "12.34 €");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        let sign = if cents < 0 { "-" } else { "" };
        let number = if self.currency_decimals > 0 {
            format!(
                "{}.{:0width$}",
                whole.abs(),
                frac,
                width = self.currency_decimals as usize
            )
        } else {
            whole.abs().to_string()
        };

        match self.symbol_position {
            SymbolPosition::Before => format!("{}{}{}", sign, self.currency_symbol, number),
            SymbolPosition::After => format!("{}{} {}", sign, number, self.currency_symbol),
        }
    }
}
