//! `greedible-recipes`: the menu catalog, recipe details and the recipe form.

pub mod draft;
pub mod recipe;

pub use draft::{DraftIngredient, IngredientLine, RecipeDraft, RecipeImage, RecipeUpdate};
pub use recipe::{
    CategoryGroup, Nutrition, Recipe, RecipeCategory, RecipeIngredient, RecipeSummary,
    flatten_catalog, search_by_name,
};
