use greedible_auth::Session;
use greedible_sales::{DailySalesPoint, RevenueRecord};

use crate::envelope::extract_list;
use crate::{ApiClient, ApiError, Backend};

impl ApiClient {
    /// `GET /api/orders/revenue`: revenue entries of every recorded day.
    pub async fn revenue(&self, session: &Session) -> Result<Vec<RevenueRecord>, ApiError> {
        let value = self
            .get(session, Backend::Main, "/api/orders/revenue", "Failed to fetch revenue")
            .await?;
        extract_list(value, "revenue", "/api/orders/revenue")
    }

    /// `GET /api/sales/daily/{year}/{month}`: order count per day.
    pub async fn daily_sales(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailySalesPoint>, ApiError> {
        let path = format!("/api/sales/daily/{year}/{month}");
        let value = self
            .get(session, Backend::Main, &path, "Failed to fetch daily sales")
            .await?;
        extract_list(value, "sales", &path)
    }
}
