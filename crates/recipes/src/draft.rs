use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greedible_core::{DomainError, DomainResult, IngredientId};

use crate::recipe::{Nutrition, Recipe, RecipeCategory};

/// Image sent with a new recipe.
#[derive(Clone, PartialEq, Eq)]
pub enum RecipeImage {
    Upload { file_name: String, bytes: Vec<u8> },
    Url(String),
}

impl RecipeImage {
    pub const PLACEHOLDER: &'static str = "/assets/placeholder.jpg";

    pub fn placeholder() -> Self {
        RecipeImage::Url(Self::PLACEHOLDER.to_string())
    }
}

impl Default for RecipeImage {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl core::fmt::Debug for RecipeImage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecipeImage::Upload { file_name, bytes } => f
                .debug_struct("Upload")
                .field("file_name", file_name)
                .field("len", &bytes.len())
                .finish(),
            RecipeImage::Url(url) => f.debug_tuple("Url").field(url).finish(),
        }
    }
}

/// An ingredient row of the recipe form. Rows still being filled in may lack
/// either value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraftIngredient {
    pub ingredient_id: Option<IngredientId>,
    pub weight: Option<Decimal>,
}

/// Ingredient line as the backend stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub ingredient_id: IngredientId,
    #[serde(with = "rust_decimal::serde::float")]
    pub weight: Decimal,
}

/// The add/edit recipe form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeDraft {
    pub name: String,
    pub category: RecipeCategory,
    pub description: String,
    pub price: Decimal,
    pub nutrition: Nutrition,
    pub image: RecipeImage,
    pub ingredients: Vec<DraftIngredient>,
}

impl RecipeDraft {
    pub fn new(name: impl Into<String>, category: RecipeCategory, price: Decimal) -> Self {
        Self {
            name: name.into(),
            category,
            price,
            ..Self::default()
        }
    }

    /// Pre-fill the form from a stored recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.recipe_name.clone(),
            category: recipe.category.clone(),
            description: recipe.description.clone(),
            price: recipe.price.amount(),
            nutrition: recipe.nutrition,
            image: recipe
                .image_url
                .clone()
                .map(RecipeImage::Url)
                .unwrap_or_default(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|i| DraftIngredient {
                    ingredient_id: Some(i.ingredient_id),
                    weight: Some(i.quantity()),
                })
                .collect(),
        }
    }

    /// Add an ingredient. Returns `false` when it is already on the recipe.
    pub fn add_ingredient(&mut self, ingredient_id: IngredientId, weight: Decimal) -> bool {
        if self
            .ingredients
            .iter()
            .any(|i| i.ingredient_id == Some(ingredient_id))
        {
            return false;
        }
        self.ingredients.push(DraftIngredient {
            ingredient_id: Some(ingredient_id),
            weight: Some(weight),
        });
        true
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Option<DraftIngredient> {
        (index < self.ingredients.len()).then(|| self.ingredients.remove(index))
    }

    /// Rows with both an ingredient and a non-zero weight.
    pub fn ingredient_lines(&self) -> Vec<IngredientLine> {
        self.ingredients
            .iter()
            .filter_map(|i| match (i.ingredient_id, i.weight) {
                (Some(ingredient_id), Some(weight)) if !weight.is_zero() => {
                    Some(IngredientLine { ingredient_id, weight })
                }
                _ => None,
            })
            .collect()
    }

    /// Check the form; on success returns the lines to submit.
    pub fn validate(&self) -> DomainResult<Vec<IngredientLine>> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Recipe name cannot be empty."));
        }
        if self.nutrition.any_negative() {
            return Err(DomainError::validation("Nutritional values cannot be negative."));
        }
        if !self.nutrition.any_positive() {
            return Err(DomainError::validation(
                "At least one nutritional value (Calories, Protein, Fat, Carbohydrates, or Fiber) must be greater than 0.",
            ));
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::validation("Price must be a positive number."));
        }

        let lines = self.ingredient_lines();
        if lines.is_empty() {
            return Err(DomainError::validation("Please add at least one ingredient."));
        }
        if lines.iter().any(|l| l.weight <= Decimal::ZERO) {
            return Err(DomainError::validation(
                "Quantity for all added ingredients must be greater than 0.",
            ));
        }
        Ok(lines)
    }

    /// Text fields of the multipart body of `POST /api/recipes`, in form order.
    ///
    /// The image part is added by the caller; a URL image is sent as
    /// `image_url`.
    pub fn form_fields(&self, lines: &[IngredientLine]) -> DomainResult<Vec<(&'static str, String)>> {
        let ingredients = serde_json::to_string(lines)
            .map_err(|e| DomainError::invariant(format!("ingredient lines: {e}")))?;

        let mut fields = vec![
            ("recipe_name", self.name.trim().to_string()),
            ("category", self.category.to_string()),
            ("calories", self.nutrition.calories.to_string()),
            ("protein", self.nutrition.protein.to_string()),
            ("fat", self.nutrition.fat.to_string()),
            ("carbohydrate", self.nutrition.carbohydrate.to_string()),
            ("fiber", self.nutrition.fiber.to_string()),
            ("price", self.price.to_string()),
            ("description", self.description.clone()),
        ];
        if let RecipeImage::Url(url) = &self.image {
            fields.push(("image_url", url.clone()));
        }
        fields.push(("ingredients", ingredients));
        Ok(fields)
    }

    /// JSON body of `PUT /api/recipes/{id}`.
    pub fn to_update(&self, lines: Vec<IngredientLine>) -> RecipeUpdate {
        let image_url = match &self.image {
            RecipeImage::Url(url) => url.clone(),
            RecipeImage::Upload { .. } => RecipeImage::PLACEHOLDER.to_string(),
        };
        RecipeUpdate {
            recipe_name: self.name.trim().to_string(),
            category: self.category.clone(),
            description: self.description.clone(),
            price: self.price,
            nutrition: self.nutrition,
            image_url,
            ingredients: lines,
        }
    }
}

/// Body of `PUT /api/recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub recipe_name: String,
    pub category: RecipeCategory,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(flatten)]
    pub nutrition: Nutrition,
    pub image_url: String,
    pub ingredients: Vec<IngredientLine>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft() -> RecipeDraft {
        let mut d = RecipeDraft::new("Com Tam", RecipeCategory::RiceDishes, dec!(50000));
        d.nutrition.calories = dec!(600);
        d.add_ingredient(IngredientId::new(1), dec!(0.3));
        d
    }

    fn message(d: &RecipeDraft) -> String {
        d.validate().unwrap_err().to_string()
    }

    #[test]
    fn complete_draft_yields_its_lines() {
        let lines = draft().validate().unwrap();
        assert_eq!(
            lines,
            vec![IngredientLine {
                ingredient_id: IngredientId::new(1),
                weight: dec!(0.3)
            }]
        );
    }

    #[test]
    fn checks_run_in_form_order() {
        let mut d = draft();
        d.name = "   ".into();
        assert_eq!(message(&d), "Recipe name cannot be empty.");

        let mut d = draft();
        d.nutrition.fat = dec!(-1);
        assert_eq!(message(&d), "Nutritional values cannot be negative.");

        let mut d = draft();
        d.nutrition = Nutrition::default();
        assert!(message(&d).starts_with("At least one nutritional value"));

        let mut d = draft();
        d.price = Decimal::ZERO;
        assert_eq!(message(&d), "Price must be a positive number.");

        let mut d = draft();
        d.ingredients.clear();
        d.ingredients.push(DraftIngredient {
            ingredient_id: None,
            weight: Some(dec!(1)),
        });
        assert_eq!(message(&d), "Please add at least one ingredient.");

        let mut d = draft();
        d.ingredients[0].weight = Some(dec!(-0.1));
        assert_eq!(
            message(&d),
            "Quantity for all added ingredients must be greater than 0."
        );
    }

    #[test]
    fn duplicate_ingredients_are_ignored() {
        let mut d = draft();
        assert!(!d.add_ingredient(IngredientId::new(1), dec!(5)));
        assert!(d.add_ingredient(IngredientId::new(2), dec!(5)));
        assert_eq!(d.ingredients.len(), 2);
        assert!(d.remove_ingredient(5).is_none());
    }

    #[test]
    fn form_fields_fall_back_to_the_placeholder_image() {
        let d = draft();
        let lines = d.validate().unwrap();
        let fields = d.form_fields(&lines).unwrap();

        assert!(fields.contains(&("image_url", "/assets/placeholder.jpg".to_string())));
        assert!(fields.contains(&("category", "Rice Dishes".to_string())));
        let (_, ingredients) = fields.last().unwrap();
        assert_eq!(ingredients, r#"[{"ingredient_id":1,"weight":0.3}]"#);
    }

    #[test]
    fn uploaded_images_are_left_to_the_caller() {
        let mut d = draft();
        d.image = RecipeImage::Upload {
            file_name: "com-tam.jpg".into(),
            bytes: vec![0xFF, 0xD8],
        };
        let fields = d.form_fields(&[]).unwrap();
        assert!(fields.iter().all(|(k, _)| *k != "image_url"));
        assert!(format!("{:?}", d.image).contains("len: 2"));
    }
}
