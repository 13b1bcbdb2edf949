use thiserror::Error;

use greedible_auth::AuthzError;
use greedible_core::DomainError;
use greedible_staff::ScheduleError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no staff authentication token found")]
    MissingToken,

    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The body parsed as JSON but not in any shape we know for this endpoint.
    #[error("unexpected response from {endpoint}: {detail}")]
    UnexpectedShape { endpoint: String, detail: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// The signed-in role may not perform the action.
    #[error(transparent)]
    Authz(#[from] AuthzError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// The short message a screen shows inline.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingToken => "Please sign in first.".to_string(),
            ApiError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Status { status: 401, .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ApiError::Status { message, .. } => message.clone(),
            ApiError::UnexpectedShape { .. } | ApiError::Decode(_) => {
                "The server sent data in an unexpected format.".to_string()
            }
            ApiError::Domain(e) => e.to_string(),
            ApiError::Schedule(e) => e.to_string(),
            ApiError::Authz(AuthzError::Unauthenticated) => "Please sign in first.".to_string(),
            ApiError::Authz(AuthzError::Forbidden { .. }) => {
                "You do not have permission to do that.".to_string()
            }
            ApiError::Config(msg) => msg.clone(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status: 401, .. }
                | ApiError::MissingToken
                | ApiError::Authz(AuthzError::Unauthenticated)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
