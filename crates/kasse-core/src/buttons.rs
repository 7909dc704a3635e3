//! # Keypad Buttons
//!
//! Typed buttons for the item pad and the cash pad.
//!
//! Each button knows its caption and the intent it raises. Buttons are
//! built straight from catalog items and the denomination schedule; no
//! behavior is ever assembled from text at runtime.

use crate::catalog::Catalog;
use crate::denomination::Denomination;
use crate::money::Money;
use crate::till::Intent;
use crate::types::{CatalogItem, ShortCode};

/// Anything the operator can tap.
pub trait Tappable {
    /// Button caption.
    fn label(&self) -> String;

    /// Intent raised by a tap.
    fn on_tap(&self) -> Intent;
}

/// Item pad button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodButton {
    pub code: ShortCode,
    pub name: String,
    pub unit_price: Money,
}

impl From<&CatalogItem> for FoodButton {
    fn from(item: &CatalogItem) -> Self {
        FoodButton {
            code: item.code.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
        }
    }
}

impl Tappable for FoodButton {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn on_tap(&self) -> Intent {
        Intent::ItemTapped {
            code: self.code.to_string(),
        }
    }
}

/// Cash pad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenominationButton(pub Denomination);

impl Tappable for DenominationButton {
    fn label(&self) -> String {
        self.0.label()
    }

    fn on_tap(&self) -> Intent {
        Intent::DenominationTapped {
            denomination: self.0,
        }
    }
}

/// One button per catalog item, in catalog order.
pub fn food_buttons(catalog: &Catalog) -> Vec<FoodButton> {
    catalog.items().iter().map(FoodButton::from).collect()
}

/// One button per denomination, smallest first.
pub fn cash_pad() -> Vec<DenominationButton> {
    Denomination::ALL.into_iter().map(DenominationButton).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_buttons_follow_catalog() {
        let catalog = Catalog::new(vec![
            CatalogItem::try_new(1, "Soup", "SP", 350, 0).unwrap(),
            CatalogItem::try_new(2, "Bratwurst", "BW", 300, 0).unwrap(),
        ])
        .unwrap();

        let buttons = food_buttons(&catalog);
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[1].label(), "Bratwurst");
        assert_eq!(
            buttons[0].on_tap(),
            Intent::ItemTapped {
                code: "SP".to_string()
            }
        );
    }

    #[test]
    fn test_cash_pad() {
        let pad = cash_pad();
        assert_eq!(pad.len(), 13);
        assert_eq!(pad[0].label(), "1 Cent");
        assert_eq!(pad[12].label(), "100 €");
        assert_eq!(
            pad[5].on_tap(),
            Intent::DenominationTapped {
                denomination: Denomination::Cent50
            }
        );
    }
}
