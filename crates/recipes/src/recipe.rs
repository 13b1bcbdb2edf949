use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use greedible_core::{Entity, IngredientId, Money, RecipeId};

/// Menu category a recipe is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RecipeCategory {
    #[default]
    MainDishes,
    SideDishes,
    Salads,
    PastaAndNoodles,
    RiceDishes,
    Soup,
    Other(String),
}

impl RecipeCategory {
    pub const KNOWN: [RecipeCategory; 6] = [
        RecipeCategory::MainDishes,
        RecipeCategory::SideDishes,
        RecipeCategory::Salads,
        RecipeCategory::PastaAndNoodles,
        RecipeCategory::RiceDishes,
        RecipeCategory::Soup,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            RecipeCategory::MainDishes => "Main Dishes",
            RecipeCategory::SideDishes => "Side Dishes",
            RecipeCategory::Salads => "Salads",
            RecipeCategory::PastaAndNoodles => "Pasta & Noodles",
            RecipeCategory::RiceDishes => "Rice Dishes",
            RecipeCategory::Soup => "Soup",
            RecipeCategory::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(raw.trim()))
            .cloned()
            .unwrap_or_else(|| RecipeCategory::Other(raw.to_string()))
    }
}

impl fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecipeCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecipeCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RecipeCategory::parse(&raw))
    }
}

/// Nutritional values per serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: Decimal,
    #[serde(default)]
    pub protein: Decimal,
    #[serde(default)]
    pub fat: Decimal,
    #[serde(default)]
    pub carbohydrate: Decimal,
    #[serde(default)]
    pub fiber: Decimal,
}

impl Nutrition {
    pub fn values(&self) -> [Decimal; 5] {
        [
            self.calories,
            self.protein,
            self.fat,
            self.carbohydrate,
            self.fiber,
        ]
    }

    pub fn any_negative(&self) -> bool {
        self.values().iter().any(|v| v.is_sign_negative() && !v.is_zero())
    }

    pub fn any_positive(&self) -> bool {
        self.values().iter().any(|v| *v > Decimal::ZERO)
    }
}

/// A recipe card in the menu catalog (`GET /api/recipes`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<RecipeCategory>,
}

impl Entity for RecipeSummary {
    type Id = RecipeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl RecipeSummary {
    pub fn matches_name(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

/// One category of the catalog; the backend groups recipes this way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: RecipeCategory,
    #[serde(default)]
    pub items: Vec<RecipeSummary>,
}

/// Concatenate every group's items, tagging each with its group's category.
pub fn flatten_catalog(groups: Vec<CategoryGroup>) -> Vec<RecipeSummary> {
    groups
        .into_iter()
        .flat_map(|group| {
            let category = group.category;
            group.items.into_iter().map(move |mut item| {
                item.category.get_or_insert_with(|| category.clone());
                item
            })
        })
        .collect()
}

pub fn search_by_name<'a>(recipes: &'a [RecipeSummary], term: &str) -> Vec<&'a RecipeSummary> {
    recipes.iter().filter(|r| r.matches_name(term)).collect()
}

/// An ingredient line of a recipe.
///
/// Older rows carry the quantity as `amount`, newer ones as `weight`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: IngredientId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl RecipeIngredient {
    pub fn quantity(&self) -> Decimal {
        self.weight.or(self.amount).unwrap_or_default()
    }
}

/// Full recipe as returned by `GET /api/recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_id: RecipeId,
    pub recipe_name: String,
    #[serde(default)]
    pub category: RecipeCategory,
    #[serde(default)]
    pub price: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

impl Entity for Recipe {
    type Id = RecipeId;

    fn id(&self) -> &Self::Id {
        &self.recipe_id
    }
}
