use reqwest::Method;
use serde_json::json;
use tracing::info;

use greedible_auth::Session;
use greedible_core::StaffId;
use greedible_staff::{EmployeePay, NewStaffMember, SalarySummary, StaffMember};

use crate::client::Body;
use crate::envelope::{extract_list, extract_object};
use crate::{ApiClient, ApiError, Backend};

impl ApiClient {
    /// `GET /api/staff/all`.
    pub async fn staff_members(&self, session: &Session) -> Result<Vec<StaffMember>, ApiError> {
        let value = self
            .get(session, Backend::Main, "/api/staff/all", "Failed to fetch staff")
            .await?;
        extract_list(value, "staff", "/api/staff/all")
    }

    /// `POST /api/staff`. Returns the stored record.
    pub async fn add_staff(
        &self,
        session: &Session,
        member: &NewStaffMember,
    ) -> Result<StaffMember, ApiError> {
        member.validate()?;
        let value = self
            .send_json(
                Method::POST,
                Some(session),
                Backend::Main,
                "/api/staff",
                member,
                "Failed to add staff member",
            )
            .await?;
        let created: StaffMember = extract_object(value, "data", "/api/staff")?;
        info!(staff_id = %created.staff_id, "staff member added");
        Ok(created)
    }

    /// `DELETE /api/staff` with the id in the body.
    pub async fn remove_staff(&self, session: &Session, id: StaffId) -> Result<(), ApiError> {
        self.dispatch(
            Method::DELETE,
            Backend::Main,
            "/api/staff",
            Some(session),
            Body::json(&json!({ "id": id }))?,
            "Failed to remove staff member",
        )
        .await?;
        info!(staff_id = %id, "staff member removed");
        Ok(())
    }

    /// `GET /api/staff/salary?month&year`: hours and salary of the signed-in
    /// staff member.
    pub async fn my_salary(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<SalarySummary, ApiError> {
        let path = format!("/api/staff/salary?month={month}&year={year}");
        let value = self
            .get(session, Backend::Staff, &path, "Failed to fetch salary")
            .await?;
        extract_object(value, "data", "/api/staff/salary")
    }

    /// `GET /api/staff/salaries?month&year`: every employee's pay for a month.
    pub async fn salaries(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<Vec<EmployeePay>, ApiError> {
        let path = format!("/api/staff/salaries?month={month}&year={year}");
        let value = self
            .get(session, Backend::Main, &path, "Failed to fetch salaries")
            .await?;
        extract_list(value, "employees", "/api/staff/salaries")
    }
}
