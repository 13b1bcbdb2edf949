use reqwest::Method;
use tracing::info;

use greedible_auth::Session;
use greedible_core::{DomainError, OrderId};
use greedible_sales::{Order, OrderStatus, StatusChange};

use crate::envelope::extract_list;
use crate::{ApiClient, ApiError, Backend};

impl ApiClient {
    /// `GET /api/orders`.
    pub async fn orders(&self, session: &Session) -> Result<Vec<Order>, ApiError> {
        let value = self
            .get(session, Backend::Main, "/api/orders", "Failed to fetch orders")
            .await?;
        extract_list(value, "orders", "/api/orders")
    }

    /// `PATCH /api/orders/{id}/status`.
    pub async fn set_order_status(
        &self,
        session: &Session,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let body = StatusChange { status };
        self.send_json(
            Method::PATCH,
            Some(session),
            Backend::Main,
            &format!("/api/orders/{id}/status"),
            &body,
            "Failed to update order status",
        )
        .await?;
        info!(order_id = %id, status = %body.status, "order status changed");
        Ok(())
    }

    /// Move an order one step along its lifecycle and return the new status.
    pub async fn advance_order(&self, session: &Session, order: &Order) -> Result<OrderStatus, ApiError> {
        let next = order.status.next().ok_or_else(|| {
            DomainError::conflict(format!(
                "Order #{} is already {}.",
                order.order_id, order.status
            ))
        })?;
        self.set_order_status(session, order.order_id, next.clone())
            .await?;
        Ok(next)
    }
}
