//! # Cash Tender
//!
//! Cash the operator has counted in from the customer.
//!
//! The total only grows while tendering, one denomination per tap. A wrong
//! tap is fixed by clearing the whole tender, mirroring the ledger's
//! clear-only policy.

use serde::Serialize;

use crate::denomination::Denomination;
use crate::error::CoreResult;
use crate::money::Money;

/// Running cash total of the current sale.
///
/// ## Invariants
/// - `total() >= 0`
/// - `total()` is the sum of every denomination added since the last reset
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CashTender {
    total: Money,
    taps: u32,
}

impl CashTender {
    pub fn new() -> Self {
        CashTender::default()
    }

    /// Adds one coin or note.
    pub fn add(&mut self, denomination: Denomination) {
        self.total += denomination.value();
        self.taps += 1;
    }

    /// Adds a raw amount, which must match a denomination exactly.
    ///
    /// ## Example
    /// ```rust
    /// use kasse_core::{CashTender, Money};
    ///
    /// let mut tender = CashTender::new();
    /// assert!(tender.add_amount(Money::from_cents(50)).is_ok());
    /// assert!(tender.add_amount(Money::from_cents(30)).is_err());
    /// assert_eq!(tender.total(), Money::from_cents(50));
    /// ```
    pub fn add_amount(&mut self, amount: Money) -> CoreResult<Denomination> {
        let denomination = Denomination::try_from(amount)?;
        self.add(denomination);
        Ok(denomination)
    }

    /// Zeroes the tender.
    pub fn reset(&mut self) {
        self.total = Money::zero();
        self.taps = 0;
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Number of denominations tapped since the last reset.
    pub fn taps(&self) -> u32 {
        self.taps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_accumulates() {
        let mut tender = CashTender::new();
        tender.add(Denomination::Euro5);
        tender.add(Denomination::Euro2);
        tender.add(Denomination::Cent50);

        assert_eq!(tender.total(), Money::from_cents(750));
        assert_eq!(tender.taps(), 3);
    }

    #[test]
    fn test_reset() {
        let mut tender = CashTender::new();
        tender.add(Denomination::Euro100);
        tender.reset();

        assert!(tender.total().is_zero());
        assert_eq!(tender.taps(), 0);
    }

    #[test]
    fn test_add_amount_rejects_off_schedule_values() {
        let mut tender = CashTender::new();
        assert!(tender.add_amount(Money::from_cents(300)).is_err());
        assert!(tender.add_amount(Money::from_cents(-200)).is_err());
        assert!(tender.total().is_zero());
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_taps(
            picks in proptest::collection::vec(0usize..Denomination::ALL.len(), 0..80)
        ) {
            let mut tender = CashTender::new();
            let mut previous = Money::zero();
            for index in &picks {
                tender.add(Denomination::ALL[*index]);
                prop_assert!(tender.total() > previous);
                previous = tender.total();
            }

            let expected: Money = picks.iter().map(|i| Denomination::ALL[*i].value()).sum();
            prop_assert_eq!(tender.total(), expected);

            tender.reset();
            prop_assert!(tender.total().is_zero());
        }
    }
}
