use reqwest::Method;
use tracing::info;

use greedible_auth::Session;
use greedible_core::RestockId;
use greedible_inventory::{RestockDraft, RestockLine, RestockOrder};
use greedible_sales::DailyImportTotal;

use crate::envelope::extract_list;
use crate::{ApiClient, ApiError, Backend};

impl ApiClient {
    /// `GET /api/restocks`: restock orders, newest first as the backend sends them.
    pub async fn restock_orders(&self, session: &Session) -> Result<Vec<RestockOrder>, ApiError> {
        let value = self
            .get(session, Backend::Main, "/api/restocks", "Failed to fetch restocks")
            .await?;
        extract_list(value, "restocks", "/api/restocks")
    }

    /// `GET /api/restocks/{id}`: the ingredient lines of one restock.
    pub async fn restock_lines(
        &self,
        session: &Session,
        id: RestockId,
    ) -> Result<Vec<RestockLine>, ApiError> {
        let path = format!("/api/restocks/{id}");
        let value = self
            .get(session, Backend::Main, &path, "Failed to fetch restock details")
            .await?;
        extract_list(value, "restockDetails", &path)
    }

    /// `POST /api/restock`.
    pub async fn create_restock(&self, session: &Session, draft: &RestockDraft) -> Result<(), ApiError> {
        draft.validate()?;
        self.send_json(
            Method::POST,
            Some(session),
            Backend::Staff,
            "/api/restock",
            draft,
            "Failed to create restock",
        )
        .await?;
        info!(
            supplier_id = ?draft.supplier_id,
            items = draft.items.len(),
            total = %draft.total_cost(),
            "restock created"
        );
        Ok(())
    }

    /// `GET /api/restock?month&year`: import spending per day.
    pub async fn daily_import_totals(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyImportTotal>, ApiError> {
        let path = format!("/api/restock?month={month}&year={year}");
        let value = self
            .get(session, Backend::Main, &path, "Failed to fetch import totals")
            .await?;
        extract_list(value, "dailyImportTotals", "/api/restock")
    }
}
