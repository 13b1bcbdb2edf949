use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greedible_core::{DomainError, DomainResult, Entity, IngredientId, SupplierId, ValueObject};

/// Shelf life of an ingredient: days after a restock before that batch expires.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShelfLife(u32);

impl ValueObject for ShelfLife {}

impl ShelfLife {
    pub const fn days(days: u32) -> Self {
        Self(days)
    }

    pub const fn as_days(&self) -> u32 {
        self.0
    }
}

/// One row of `GET /api/ingredients`.
///
/// The backend joins ingredients with their suppliers, so an ingredient bought
/// from two suppliers comes back as two rows sharing the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub minimum_threshold: Option<Decimal>,
    #[serde(default)]
    pub good_for: Option<ShelfLife>,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    #[serde(default)]
    pub supplier_name: Option<String>,
}

/// An ingredient with every supplier it is bought from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub minimum_threshold: Option<Decimal>,
    pub good_for: Option<ShelfLife>,
    /// Supplier of the first row seen (what the edit form pre-selects).
    pub supplier_id: Option<SupplierId>,
    /// Distinct supplier names, in first-seen order.
    pub suppliers: Vec<String>,
}

impl Entity for Ingredient {
    type Id = IngredientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Ingredient {
    /// Stock is at or below the minimum threshold.
    ///
    /// Both values must be known; a missing one never triggers a restock.
    pub fn needs_restock(&self) -> bool {
        needs_restock(self.quantity, self.minimum_threshold)
    }

    /// Shelf life and threshold, the inputs the expiration engine needs.
    pub fn stock_levels(&self) -> crate::StockLevels {
        crate::StockLevels {
            minimum_threshold: self.minimum_threshold,
            good_for: self.good_for,
        }
    }

    pub fn matches_name(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

pub(crate) fn needs_restock(quantity: Option<Decimal>, threshold: Option<Decimal>) -> bool {
    match (quantity, threshold) {
        (Some(q), Some(t)) => q <= t,
        _ => false,
    }
}

/// Merge supplier-joined rows into one `Ingredient` per id.
///
/// Ingredient order follows the first appearance of each id. Stock fields are
/// taken from the first row.
pub fn group_rows(rows: impl IntoIterator<Item = IngredientRow>) -> Vec<Ingredient> {
    let mut grouped: Vec<Ingredient> = Vec::new();

    for row in rows {
        let idx = match grouped.iter().position(|i| i.id == row.ingredient_id) {
            Some(idx) => idx,
            None => {
                grouped.push(Ingredient {
                    id: row.ingredient_id,
                    name: row.ingredient_name.clone(),
                    quantity: row.quantity,
                    unit: row.unit.clone(),
                    minimum_threshold: row.minimum_threshold,
                    good_for: row.good_for,
                    supplier_id: row.supplier_id,
                    suppliers: Vec::new(),
                });
                grouped.len() - 1
            }
        };

        if let Some(name) = row.supplier_name.filter(|n| !n.trim().is_empty()) {
            let entry = &mut grouped[idx];
            if !entry.suppliers.contains(&name) {
                entry.suppliers.push(name);
            }
        }
    }

    grouped
}

/// Ingredients whose stock is at or below their minimum threshold.
pub fn restock_needed(ingredients: &[Ingredient]) -> Vec<&Ingredient> {
    ingredients.iter().filter(|i| i.needs_restock()).collect()
}

/// Case-insensitive name search.
pub fn search_by_name<'a>(ingredients: &'a [Ingredient], term: &str) -> Vec<&'a Ingredient> {
    ingredients.iter().filter(|i| i.matches_name(term)).collect()
}

/// Body of `POST /api/ingredients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDraft {
    pub ingredient_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub minimum_threshold: Decimal,
}

impl IngredientDraft {
    pub fn new(name: impl Into<String>, quantity: Decimal, minimum_threshold: Decimal) -> Self {
        Self {
            ingredient_name: name.into(),
            quantity,
            unit: "kg".to_string(),
            minimum_threshold,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_stock_fields(&self.ingredient_name, self.quantity, self.minimum_threshold)?;
        if self.unit.trim().is_empty() {
            return Err(DomainError::validation("Unit is required."));
        }
        Ok(())
    }
}

/// Body of `PUT /api/ingredients/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientUpdate {
    pub ingredient_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub minimum_threshold: Decimal,
    pub supplier_id: Option<SupplierId>,
    pub good_for: Option<ShelfLife>,
}

impl IngredientUpdate {
    /// Pre-fill an update from the current record, as the edit form does.
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            ingredient_name: ingredient.name.clone(),
            quantity: ingredient.quantity.unwrap_or_default(),
            unit: ingredient.unit.clone().unwrap_or_default(),
            minimum_threshold: ingredient.minimum_threshold.unwrap_or_default(),
            supplier_id: ingredient.supplier_id,
            good_for: ingredient.good_for,
        }
    }

    /// A shelf life of zero days clears the field.
    pub fn with_good_for(mut self, days: Option<u32>) -> Self {
        self.good_for = days.filter(|d| *d > 0).map(ShelfLife::days);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_stock_fields(&self.ingredient_name, self.quantity, self.minimum_threshold)
    }
}

fn validate_stock_fields(name: &str, quantity: Decimal, threshold: Decimal) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Ingredient name is required."));
    }
    if quantity.is_sign_negative() {
        return Err(DomainError::validation("Quantity cannot be negative."));
    }
    if threshold.is_sign_negative() {
        return Err(DomainError::validation("Minimum threshold cannot be negative."));
    }
    Ok(())
}

/// A supplier the restaurant buys from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_id: SupplierId,
    pub supplier_name: String,
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.supplier_id
    }
}

/// Wasted stock reported for the current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteRecord {
    pub ingredient_name: String,
    pub wasted_quantity: Decimal,
    #[serde(default)]
    pub unit: Option<String>,
}
