//! # Denominations
//!
//! The fixed coin and note schedule of the till's cash pad.
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬──────────┬──────────┐
//! │  1 Cent  │  2 Cent  │  5 Cent  │ 10 Cent  │ 20 Cent  │ 50 Cent  │
//! ├──────────┼──────────┼──────────┼──────────┼──────────┼──────────┤
//! │   1 €    │   2 €    │   5 €    │   10 €   │   20 €   │   50 €   │
//! ├──────────┴──────────┴──────────┴──────────┴──────────┴──────────┤
//! │  100 €                                                           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tender only ever grows by one of these values, so an arbitrary amount can
//! never reach the cash total.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::money::Money;

/// A coin or note the operator can tap on the cash pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    Cent1,
    Cent2,
    Cent5,
    Cent10,
    Cent20,
    Cent50,
    Euro1,
    Euro2,
    Euro5,
    Euro10,
    Euro20,
    Euro50,
    Euro100,
}

impl Denomination {
    /// Every denomination in cash pad order (smallest first).
    pub const ALL: [Denomination; 13] = [
        Denomination::Cent1,
        Denomination::Cent2,
        Denomination::Cent5,
        Denomination::Cent10,
        Denomination::Cent20,
        Denomination::Cent50,
        Denomination::Euro1,
        Denomination::Euro2,
        Denomination::Euro5,
        Denomination::Euro10,
        Denomination::Euro20,
        Denomination::Euro50,
        Denomination::Euro100,
    ];

    /// Face value.
    pub const fn value(self) -> Money {
        let cents = match self {
            Denomination::Cent1 => 1,
            Denomination::Cent2 => 2,
            Denomination::Cent5 => 5,
            Denomination::Cent10 => 10,
            Denomination::Cent20 => 20,
            Denomination::Cent50 => 50,
            Denomination::Euro1 => 100,
            Denomination::Euro2 => 200,
            Denomination::Euro5 => 500,
            Denomination::Euro10 => 1_000,
            Denomination::Euro20 => 2_000,
            Denomination::Euro50 => 5_000,
            Denomination::Euro100 => 10_000,
        };
        Money::from_cents(cents)
    }

    /// Button caption, e.g. `"50 Cent"` or `"20 €"`.
    pub fn label(self) -> String {
        let cents = self.value().cents();
        if cents < 100 {
            format!("{} Cent", cents)
        } else {
            format!("{} €", cents / 100)
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Maps a raw amount back onto the schedule.
///
/// ## Example
/// ```rust
/// use kasse_core::{Denomination, Money};
///
/// assert_eq!(Denomination::try_from(Money::from_cents(200)).unwrap(), Denomination::Euro2);
/// assert!(Denomination::try_from(Money::from_cents(300)).is_err());
/// ```
impl TryFrom<Money> for Denomination {
    type Error = CoreError;

    fn try_from(amount: Money) -> Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.value() == amount)
            .ok_or(CoreError::UnknownDenomination(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_ascending_and_positive() {
        let values: Vec<i64> = Denomination::ALL.iter().map(|d| d.value().cents()).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(values.iter().all(|v| *v > 0));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Denomination::Cent1.label(), "1 Cent");
        assert_eq!(Denomination::Cent50.label(), "50 Cent");
        assert_eq!(Denomination::Euro1.label(), "1 €");
        assert_eq!(Denomination::Euro100.label(), "100 €");
    }

    #[test]
    fn test_try_from_money() {
        for denomination in Denomination::ALL {
            assert_eq!(Denomination::try_from(denomination.value()).unwrap(), denomination);
        }
        assert!(matches!(
            Denomination::try_from(Money::from_cents(25)),
            Err(CoreError::UnknownDenomination(_))
        ));
        assert!(Denomination::try_from(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Denomination::Euro20).unwrap();
        assert_eq!(json, "\"euro20\"");
    }
}
