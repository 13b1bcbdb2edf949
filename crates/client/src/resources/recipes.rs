use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use tracing::info;

use greedible_auth::Session;
use greedible_core::RecipeId;
use greedible_recipes::{
    CategoryGroup, Recipe, RecipeDraft, RecipeImage, RecipeSummary, flatten_catalog,
};

use crate::client::Body;
use crate::envelope::{extract_list, extract_object};
use crate::{ApiClient, ApiError, Backend};

impl ApiClient {
    /// `GET /api/recipes`: the whole menu, flattened out of its category groups.
    pub async fn recipe_catalog(&self, session: &Session) -> Result<Vec<RecipeSummary>, ApiError> {
        let value = self
            .get(session, Backend::Main, "/api/recipes", "Failed to fetch recipes")
            .await?;
        let groups: Vec<CategoryGroup> = extract_list(value, "recipes", "/api/recipes")?;
        Ok(flatten_catalog(groups))
    }

    /// `GET /api/recipes/{id}`.
    pub async fn recipe(&self, session: &Session, id: RecipeId) -> Result<Recipe, ApiError> {
        let path = format!("/api/recipes/{id}");
        let value = self
            .get(session, Backend::Main, &path, "Failed to fetch recipe details")
            .await?;
        extract_object(value, "recipe", &path)
    }

    /// `POST /api/recipes` as multipart form data. An uploaded image travels
    /// as the `image` part.
    pub async fn create_recipe(&self, session: &Session, draft: &RecipeDraft) -> Result<(), ApiError> {
        let lines = draft.validate()?;

        let mut form = Form::new();
        for (name, value) in draft.form_fields(&lines)? {
            form = form.text(name, value);
        }
        if let RecipeImage::Upload { file_name, bytes } = &draft.image {
            form = form.part("image", Part::bytes(bytes.clone()).file_name(file_name.clone()));
        }

        self.dispatch(
            Method::POST,
            Backend::Staff,
            "/api/recipes",
            Some(session),
            Body::Multipart(form),
            "Failed to add recipe",
        )
        .await?;
        info!(name = %draft.name.trim(), ingredients = lines.len(), "recipe added");
        Ok(())
    }

    /// `PUT /api/recipes/{id}` with a JSON body.
    pub async fn update_recipe(
        &self,
        session: &Session,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<(), ApiError> {
        let lines = draft.validate()?;
        let update = draft.to_update(lines);
        self.send_json(
            Method::PUT,
            Some(session),
            Backend::Main,
            &format!("/api/recipes/{id}"),
            &update,
            "Failed to update recipe",
        )
        .await?;
        info!(%id, "recipe updated");
        Ok(())
    }

    /// `DELETE /api/recipes/{id}`.
    pub async fn delete_recipe(&self, session: &Session, id: RecipeId) -> Result<(), ApiError> {
        self.delete(
            session,
            Backend::Staff,
            &format!("/api/recipes/{id}"),
            "Failed to delete recipe",
        )
        .await?;
        info!(%id, "recipe deleted");
        Ok(())
    }

    /// Take a recipe off the menu without deleting it.
    pub async fn discontinue_recipe(&self, session: &Session, id: RecipeId) -> Result<(), ApiError> {
        self.send_json(
            Method::POST,
            Some(session),
            Backend::Main,
            "/api/recipes/discontinute",
            &json!({ "recipe_id": id }),
            "Failed to discontinue recipe",
        )
        .await?;
        info!(%id, "recipe discontinued");
        Ok(())
    }
}
