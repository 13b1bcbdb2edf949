use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use greedible_auth::Session;
use greedible_core::IngredientId;
use greedible_inventory::{
    Ingredient, IngredientDraft, IngredientRow, IngredientUpdate, RestockBatch, Supplier,
    WasteRecord, group_rows,
};

use crate::envelope::{decode, extract_list};
use crate::{ApiClient, ApiError, Backend};

#[derive(Deserialize)]
struct Created {
    #[serde(default, rename = "ingredientId")]
    ingredient_id: Option<IngredientId>,
}

impl ApiClient {
    /// `GET /api/ingredients`, one entry per ingredient with its suppliers merged.
    pub async fn ingredients(&self, session: &Session) -> Result<Vec<Ingredient>, ApiError> {
        let value = self
            .get(session, Backend::Staff, "/api/ingredients", "Failed to fetch ingredients")
            .await?;
        let rows: Vec<IngredientRow> = extract_list(value, "ingredients", "/api/ingredients")?;
        Ok(group_rows(rows))
    }

    /// `POST /api/ingredients`. Returns the new id when the backend reports it.
    pub async fn create_ingredient(
        &self,
        session: &Session,
        draft: &IngredientDraft,
    ) -> Result<Option<IngredientId>, ApiError> {
        draft.validate()?;
        let value = self
            .send_json(
                Method::POST,
                Some(session),
                Backend::Staff,
                "/api/ingredients",
                draft,
                "Failed to add ingredient",
            )
            .await?;
        let id = decode::<Created>(value, "/api/ingredients")
            .ok()
            .and_then(|c| c.ingredient_id);
        info!(name = %draft.ingredient_name, ?id, "ingredient added");
        Ok(id)
    }

    /// `PUT /api/ingredients/{id}`.
    pub async fn update_ingredient(
        &self,
        session: &Session,
        id: IngredientId,
        update: &IngredientUpdate,
    ) -> Result<(), ApiError> {
        update.validate()?;
        self.send_json(
            Method::PUT,
            Some(session),
            Backend::Staff,
            &format!("/api/ingredients/{id}"),
            update,
            "Failed to update ingredient",
        )
        .await?;
        info!(%id, "ingredient updated");
        Ok(())
    }

    /// `DELETE /api/ingredients/{id}`.
    pub async fn delete_ingredient(&self, session: &Session, id: IngredientId) -> Result<(), ApiError> {
        self.delete(
            session,
            Backend::Staff,
            &format!("/api/ingredients/{id}"),
            "Failed to delete ingredient",
        )
        .await?;
        info!(%id, "ingredient deleted");
        Ok(())
    }

    /// `GET /api/ingredients/restocks`: every batch of every ingredient.
    pub async fn restock_batches(&self, session: &Session) -> Result<Vec<RestockBatch>, ApiError> {
        let value = self
            .get(
                session,
                Backend::Staff,
                "/api/ingredients/restocks",
                "Failed to fetch restock details",
            )
            .await?;
        extract_list(value, "restockDetails", "/api/ingredients/restocks")
    }

    /// `GET /api/ingredients/waste`.
    pub async fn waste(&self, session: &Session) -> Result<Vec<WasteRecord>, ApiError> {
        let value = self
            .get(session, Backend::Main, "/api/ingredients/waste", "Failed to fetch waste data")
            .await?;
        extract_list(value, "waste", "/api/ingredients/waste")
    }

    /// `GET /api/suppliers`.
    pub async fn suppliers(&self, session: &Session) -> Result<Vec<Supplier>, ApiError> {
        let value = self
            .get(session, Backend::Staff, "/api/suppliers", "Failed to fetch suppliers")
            .await?;
        extract_list(value, "suppliers", "/api/suppliers")
    }
}
