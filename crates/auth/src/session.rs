use serde::{Deserialize, Serialize};

use greedible_core::StaffId;

use crate::Role;

/// The signed-in staff member, as returned by login and `GET /api/staff/me`.
///
/// Depending on the endpoint the id arrives as `id` or `staff_id` and the
/// name as `name` or `staff_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StaffId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<StaffId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl StaffProfile {
    pub fn staff_id(&self) -> Option<StaffId> {
        self.id.or(self.staff_id)
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.staff_name.as_deref())
            .unwrap_or("")
    }
}

/// An authenticated session: the bearer token and who it belongs to.
///
/// The token is opaque and never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    pub profile: Option<StaffProfile>,
}

impl Session {
    pub fn new(token: impl Into<String>, profile: Option<StaffProfile>) -> Self {
        Self {
            token: token.into(),
            profile,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn with_profile(mut self, profile: StaffProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn staff_id(&self) -> Option<StaffId> {
        self.profile.as_ref().and_then(StaffProfile::staff_id)
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

/// Body of `POST /api/staff/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<StaffProfile>,
}

impl From<LoginResponse> for Session {
    fn from(value: LoginResponse) -> Self {
        Session::new(value.token, value.user)
    }
}
