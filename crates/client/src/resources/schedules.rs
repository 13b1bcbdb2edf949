use reqwest::Method;
use serde_json::json;
use tracing::info;

use greedible_auth::Session;
use greedible_core::ScheduleId;
use greedible_staff::{DaySchedule, MonthSchedule, NewShift, ShiftBlock, SignUpRequest};

use crate::client::Body;
use crate::envelope::extract_list;
use crate::{ApiClient, ApiError, Backend};

impl ApiClient {
    /// `POST /api/schedules/month`: every shift of a month with its staff.
    pub async fn month_schedule(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<MonthSchedule, ApiError> {
        let value = self
            .send_json(
                Method::POST,
                Some(session),
                Backend::Main,
                "/api/schedules/month",
                &json!({ "month": month, "year": year }),
                "Failed to fetch schedule",
            )
            .await?;
        let days: Vec<DaySchedule> = extract_list(value, "schedule", "/api/schedules/month")?;
        Ok(MonthSchedule::new(year, month, days))
    }

    /// `POST /api/schedules` without a staff member: opens an empty shift.
    pub async fn create_shift(&self, session: &Session, shift: &NewShift) -> Result<(), ApiError> {
        self.send_json(
            Method::POST,
            Some(session),
            Backend::Main,
            "/api/schedules",
            shift,
            "Failed to create shift",
        )
        .await?;
        info!(date = %shift.shift_date, shift = %shift.shift, "shift created");
        Ok(())
    }

    /// `POST /api/schedules` with a staff member.
    pub async fn sign_up(&self, session: &Session, request: &SignUpRequest) -> Result<(), ApiError> {
        self.send_json(
            Method::POST,
            Some(session),
            Backend::Main,
            "/api/schedules",
            request,
            "Failed to sign up for shift",
        )
        .await?;
        info!(
            date = %request.shift_date,
            shift = %request.shift,
            staff_id = %request.staff_id,
            "signed up for shift"
        );
        Ok(())
    }

    /// `DELETE /api/schedules/{id}`: removes one assignment.
    pub async fn remove_assignment(&self, session: &Session, id: ScheduleId) -> Result<(), ApiError> {
        self.delete(
            session,
            Backend::Main,
            &format!("/api/schedules/{id}"),
            "Failed to remove assignment",
        )
        .await?;
        info!(schedule_id = %id, "assignment removed");
        Ok(())
    }

    /// `DELETE /api/schedules/block`: removes a shift and all of its
    /// assignments.
    pub async fn delete_shift_block(&self, session: &Session, block: &ShiftBlock) -> Result<(), ApiError> {
        self.dispatch(
            Method::DELETE,
            Backend::Main,
            "/api/schedules/block",
            Some(session),
            Body::json(block)?,
            "Failed to delete shift",
        )
        .await?;
        info!(date = %block.shift_date, shift = %block.shift, "shift deleted");
        Ok(())
    }
}
