use reqwest::Method;
use tracing::info;

use greedible_auth::{LoginRequest, LoginResponse, Session, StaffProfile};

use crate::envelope::{decode, extract_object};
use crate::{ApiClient, ApiError, Backend};

impl ApiClient {
    /// `POST /api/staff/login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let value = self
            .send_json(
                Method::POST,
                None,
                Backend::Staff,
                "/api/staff/login",
                &body,
                "Login failed. Please try again.",
            )
            .await?;

        let response: LoginResponse = decode(value, "/api/staff/login")?;
        let session = Session::from(response);
        info!(staff_id = ?session.staff_id(), "signed in");
        Ok(session)
    }

    /// `GET /api/staff/me`: the profile the token belongs to.
    pub async fn me(&self, session: &Session) -> Result<StaffProfile, ApiError> {
        let value = self
            .get(session, Backend::Staff, "/api/staff/me", "Token validation failed")
            .await?;
        extract_object(value, "user", "/api/staff/me")
    }

    /// Check a saved session against the backend and refresh its profile.
    pub async fn validate(&self, session: Session) -> Result<Session, ApiError> {
        let profile = self.me(&session).await?;
        Ok(session.with_profile(profile))
    }
}
