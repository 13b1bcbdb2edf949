use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greedible_core::date::{calendar_date, optional_calendar_date};
use greedible_core::{
    DomainError, DomainResult, IngredientId, Money, RestockId, SupplierId, format_dmy,
};

/// One delivery of one ingredient (a row of `GET /api/ingredients/restocks`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockBatch {
    #[serde(default, alias = "restock_id")]
    pub id: Option<RestockId>,
    pub ingredient_id: IngredientId,
    #[serde(with = "calendar_date")]
    pub restock_date: NaiveDate,
    #[serde(default)]
    pub import_quantity: Decimal,
    #[serde(default)]
    pub import_price: Money,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
}

/// Group batches per ingredient, preserving the order they arrived in.
pub fn group_batches_by_ingredient(
    batches: impl IntoIterator<Item = RestockBatch>,
) -> HashMap<IngredientId, Vec<RestockBatch>> {
    let mut grouped: HashMap<IngredientId, Vec<RestockBatch>> = HashMap::new();
    for batch in batches {
        grouped.entry(batch.ingredient_id).or_default().push(batch);
    }
    grouped
}

/// Most recent restock date among `batches`.
pub fn latest_restock_date(batches: &[RestockBatch]) -> Option<NaiveDate> {
    batches.iter().map(|b| b.restock_date).max()
}

/// A restock order as listed in the restock management table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockOrder {
    pub restock_id: RestockId,
    #[serde(default, with = "optional_calendar_date")]
    pub restock_date: Option<NaiveDate>,
    #[serde(default)]
    pub supplier_name: String,
}

impl RestockOrder {
    /// Quick search: supplier name (case-insensitive) or the displayed date.
    pub fn matches(&self, term: &str) -> bool {
        if self
            .supplier_name
            .to_lowercase()
            .contains(&term.to_lowercase())
        {
            return true;
        }
        self.restock_date
            .map(|d| format_dmy(d).contains(term))
            .unwrap_or(false)
    }
}

pub fn filter_restock_orders<'a>(orders: &'a [RestockOrder], term: &str) -> Vec<&'a RestockOrder> {
    orders.iter().filter(|o| o.matches(term)).collect()
}

/// One ingredient line of a restock order (`GET /api/restocks/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockLine {
    #[serde(default)]
    pub ingredient_id: Option<IngredientId>,
    #[serde(default)]
    pub ingredient_name: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub import_quantity: Decimal,
    pub import_price: Money,
}

impl RestockLine {
    pub fn line_cost(&self) -> Money {
        Money::new(self.import_quantity * self.import_price.amount())
    }
}

/// Σ quantity × unit price over all lines.
pub fn restock_total_cost(lines: &[RestockLine]) -> Money {
    lines.iter().map(RestockLine::line_cost).sum()
}

/// One line of a new restock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockItem {
    pub ingredient_id: IngredientId,
    #[serde(with = "rust_decimal::serde::float")]
    pub import_quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub import_price: Decimal,
}

/// Body of `POST /api/restock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockDraft {
    pub supplier_id: Option<SupplierId>,
    pub items: Vec<RestockItem>,
}

impl RestockDraft {
    pub fn new(supplier_id: SupplierId) -> Self {
        Self {
            supplier_id: Some(supplier_id),
            items: Vec::new(),
        }
    }

    /// Add an ingredient line. Returns `false` (and changes nothing) when the
    /// ingredient is already on the order.
    pub fn add_item(&mut self, item: RestockItem) -> bool {
        if self.items.iter().any(|i| i.ingredient_id == item.ingredient_id) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove_item(&mut self, index: usize) -> Option<RestockItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn total_cost(&self) -> Money {
        self.items
            .iter()
            .map(|i| Money::new(i.import_quantity * i.import_price))
            .sum()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.supplier_id.is_none() {
            return Err(DomainError::validation("Please select a supplier."));
        }
        if self.items.is_empty() {
            return Err(DomainError::validation(
                "Please add at least one ingredient item.",
            ));
        }
        if self
            .items
            .iter()
            .any(|i| i.import_quantity.is_sign_negative() || i.import_price.is_sign_negative())
        {
            return Err(DomainError::validation(
                "Import quantity and price cannot be negative.",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn total_cost_multiplies_quantity_by_unit_price() {
        let lines = vec![
            RestockLine {
                ingredient_id: None,
                ingredient_name: "Beef".into(),
                unit: Some("kg".into()),
                import_quantity: dec!(2.5),
                import_price: Money::new(dec!(200000)),
            },
            RestockLine {
                ingredient_id: None,
                ingredient_name: "Salt".into(),
                unit: None,
                import_quantity: dec!(3),
                import_price: Money::new(dec!(10000)),
            },
        ];
        assert_eq!(restock_total_cost(&lines), Money::new(dec!(530000)));
        assert_eq!(restock_total_cost(&[]), Money::ZERO);
    }

    #[test]
    fn orders_filter_by_supplier_or_displayed_date() {
        let orders = vec![
            RestockOrder {
                restock_id: RestockId::new(1),
                restock_date: Some(date(2024, 5, 3)),
                supplier_name: "Fresh Farm".into(),
            },
            RestockOrder {
                restock_id: RestockId::new(2),
                restock_date: None,
                supplier_name: "Ocean Catch".into(),
            },
        ];

        assert_eq!(filter_restock_orders(&orders, "fresh").len(), 1);
        assert_eq!(filter_restock_orders(&orders, "03/05").len(), 1);
        assert_eq!(filter_restock_orders(&orders, "").len(), 2);
        assert!(filter_restock_orders(&orders, "2023").is_empty());
    }

    #[test]
    fn batches_parse_with_timestamp_dates() {
        let json = r#"{
            "ingredient_id": 3,
            "restock_date": "2024-05-01T00:00:00.000Z",
            "import_quantity": "4.00",
            "import_price": 12000,
            "supplier_id": 2
        }"#;
        let batch: RestockBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.restock_date, date(2024, 5, 1));
        assert_eq!(batch.import_quantity, dec!(4));
        assert_eq!(batch.id, None);
    }

    #[test]
    fn grouping_and_latest_date() {
        let mk = |ing: i64, d: NaiveDate| RestockBatch {
            id: None,
            ingredient_id: IngredientId::new(ing),
            restock_date: d,
            import_quantity: dec!(1),
            import_price: Money::ZERO,
            supplier_id: None,
        };
        let grouped = group_batches_by_ingredient(vec![
            mk(1, date(2024, 1, 1)),
            mk(2, date(2024, 1, 2)),
            mk(1, date(2024, 2, 1)),
        ]);
        let ones = &grouped[&IngredientId::new(1)];
        assert_eq!(ones.len(), 2);
        assert_eq!(latest_restock_date(ones), Some(date(2024, 2, 1)));
        assert_eq!(latest_restock_date(&[]), None);
    }

    #[test]
    fn draft_rejects_duplicates_and_requires_supplier_and_items() {
        let mut draft = RestockDraft {
            supplier_id: None,
            items: Vec::new(),
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            DomainError::validation("Please select a supplier.")
        );

        draft.supplier_id = Some(SupplierId::new(4));
        assert!(draft.validate().is_err());

        let item = RestockItem {
            ingredient_id: IngredientId::new(9),
            import_quantity: dec!(5),
            import_price: dec!(1000),
        };
        assert!(draft.add_item(item.clone()));
        assert!(!draft.add_item(item));
        assert_eq!(draft.items.len(), 1);
        assert!(draft.validate().is_ok());
        assert_eq!(draft.total_cost(), Money::new(dec!(5000)));

        assert!(draft.remove_item(3).is_none());
        assert!(draft.remove_item(0).is_some());
        assert!(draft.items.is_empty());
    }
}
