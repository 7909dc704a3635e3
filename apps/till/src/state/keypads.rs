//! # Keypads
//!
//! The two button grids of the register, numbered from 1 the way the
//! operator sees them.
//!
//! ```text
//!   Item pad (View::ItemSelection)        Cash pad (View::CashPad)
//!   [1] Soup  [2] Bratwurst  ...          [1] 1 Cent ... [13] 100 €
//! ```

use kasse_core::{cash_pad, food_buttons, Catalog, DenominationButton, FoodButton, Intent, Tappable, View};

/// Item and cash pads built once per session.
#[derive(Debug, Clone)]
pub struct Keypads {
    food: Vec<FoodButton>,
    cash: Vec<DenominationButton>,
}

impl Keypads {
    pub fn new(catalog: &Catalog) -> Self {
        Keypads {
            food: food_buttons(catalog),
            cash: cash_pad(),
        }
    }

    /// Captions of the pad shown in `view`, in button order.
    pub fn labels(&self, view: View) -> Vec<String> {
        match view {
            View::ItemSelection => self.food.iter().map(|b| b.label()).collect(),
            View::CashPad => self.cash.iter().map(|b| b.label()).collect(),
        }
    }

    /// Intent of button `number` (1-based) on the pad shown in `view`.
    pub fn tap(&self, view: View, number: usize) -> Option<Intent> {
        let index = number.checked_sub(1)?;
        match view {
            View::ItemSelection => self.food.get(index).map(|b| b.on_tap()),
            View::CashPad => self.cash.get(index).map(|b| b.on_tap()),
        }
    }

    /// Item buttons, for price display.
    pub fn food(&self) -> &[FoodButton] {
        &self.food
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasse_core::{CatalogItem, Denomination};

    fn keypads() -> Keypads {
        let catalog = Catalog::new(vec![
            CatalogItem::try_new(1, "Soup", "SP", 350, 0).unwrap(),
            CatalogItem::try_new(2, "Bratwurst", "BW", 300, 0).unwrap(),
        ])
        .unwrap();
        Keypads::new(&catalog)
    }

    #[test]
    fn test_tap_is_one_based() {
        let pads = keypads();

        assert_eq!(
            pads.tap(View::ItemSelection, 2),
            Some(Intent::ItemTapped {
                code: "BW".to_string()
            })
        );
        assert_eq!(pads.tap(View::ItemSelection, 0), None);
        assert_eq!(pads.tap(View::ItemSelection, 3), None);
        assert_eq!(
            pads.tap(View::CashPad, 13),
            Some(Intent::DenominationTapped {
                denomination: Denomination::Euro100
            })
        );
    }

    #[test]
    fn test_labels() {
        let pads = keypads();
        assert_eq!(pads.labels(View::ItemSelection), vec!["Soup", "Bratwurst"]);
        assert_eq!(pads.labels(View::CashPad)[6], "1 €");
    }
}
