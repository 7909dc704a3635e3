//! # Catalog
//!
//! The list of items the stand sells during one session.
//!
//! The catalog is loaded once at startup. Its code order fixes the column
//! order of every transaction record written in the session. The only
//! mutation is refreshing sold counters after a successful settlement.

use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CatalogItem, ShortCode, SoldCount};

/// Immutable-per-session item list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate short codes.
    ///
    /// Codes are compared case-insensitively because they share the
    /// transaction log's column namespace.
    pub fn new(items: Vec<CatalogItem>) -> CoreResult<Self> {
        for (index, item) in items.iter().enumerate() {
            if items[..index].iter().any(|earlier| earlier.code.matches(item.code.as_str())) {
                return Err(CoreError::malformed_row(
                    item.id,
                    ValidationError::Duplicate {
                        field: "short_code".to_string(),
                        value: item.code.to_string(),
                    }
                    .to_string(),
                ));
            }
        }

        debug!(items = items.len(), "Catalog built");
        Ok(Catalog { items })
    }

    /// Looks up an item by short code.
    pub fn get(&self, code: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.code.matches(code))
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Short codes in catalog order (the transaction log column order).
    pub fn codes(&self) -> Vec<ShortCode> {
        self.items.iter().map(|item| item.code.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Refreshes the session snapshot with counters read back from storage.
    pub fn apply_sold_counts(&mut self, counts: &[SoldCount]) {
        for count in counts {
            if let Some(item) = self
                .items
                .iter_mut()
                .find(|item| item.code.matches(count.code.as_str()))
            {
                item.sold_count = count.sold;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, code: &str, price: i64) -> CatalogItem {
        CatalogItem::try_new(id, format!("Item {code}"), code, price, 0).unwrap()
    }

    #[test]
    fn test_lookup_and_order() {
        let catalog = Catalog::new(vec![item(1, "SP", 350), item(2, "BW", 300)]).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("BW").unwrap().id, 2);
        assert_eq!(catalog.get("sp").unwrap().id, 1);
        assert!(catalog.get("XX").is_none());

        let codes: Vec<String> = catalog.codes().into_iter().map(String::from).collect();
        assert_eq!(codes, vec!["SP", "BW"]);
    }

    #[test]
    fn test_duplicate_codes_are_malformed() {
        let result = Catalog::new(vec![item(1, "SP", 350), item(2, "sp", 400)]);
        assert!(matches!(result, Err(CoreError::MalformedCatalogRow { .. })));
    }

    #[test]
    fn test_apply_sold_counts() {
        let mut catalog = Catalog::new(vec![item(1, "SP", 350), item(2, "BW", 300)]).unwrap();
        catalog.apply_sold_counts(&[SoldCount {
            code: ShortCode::new("SP").unwrap(),
            sold: 42,
        }]);

        assert_eq!(catalog.get("SP").unwrap().sold_count, 42);
        assert_eq!(catalog.get("BW").unwrap().sold_count, 0);
    }
}
