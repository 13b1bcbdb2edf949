use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::{Datelike, Local, NaiveDate};

use greedible_auth::{Screen, Session, authorize};
use greedible_client::{ApiClient, ApiError, ClientConfig};

use crate::args::MonthArgs;
use crate::session_store;

/// Everything a command needs: the client, output mode and where the
/// session comes from.
pub struct Context {
    pub client: ApiClient,
    pub json: bool,
    pub today: NaiveDate,
    token: Option<String>,
    locate_session: fn() -> Result<PathBuf>,
}

impl Context {
    pub fn initialize(json: bool, token: Option<String>) -> Result<Self> {
        let config = ClientConfig::from_env().context("invalid client configuration")?;
        let client = ApiClient::new(config)?;
        Ok(Self::new(client, json, token, session_store::session_path))
    }

    fn new(
        client: ApiClient,
        json: bool,
        token: Option<String>,
        locate_session: fn() -> Result<PathBuf>,
    ) -> Self {
        Self {
            client,
            json,
            today: Local::now().date_naive(),
            token: token.filter(|t| !t.trim().is_empty()),
            locate_session,
        }
    }

    /// Where the saved session lives. Resolved on use, so `--token` works on
    /// hosts without a config directory.
    pub fn session_path(&self) -> Result<PathBuf> {
        (self.locate_session)()
    }

    /// The current session: `--token` (validated against the backend) or the
    /// saved one.
    pub async fn session(&self) -> Result<Session> {
        if let Some(token) = &self.token {
            let session = self
                .client
                .validate(Session::new(token.clone(), None))
                .await
                .context("token validation failed")?;
            return Ok(session);
        }
        session_store::load(&self.session_path()?)?.ok_or_else(|| ApiError::MissingToken.into())
    }

    pub fn uses_saved_session(&self) -> bool {
        self.token.is_none()
    }

    /// The current session, after checking that its profile may open `screen`.
    pub async fn session_for(&self, screen: Screen) -> Result<Session> {
        let session = self.session().await?;
        authorize(session.profile.as_ref(), screen).map_err(ApiError::from)?;
        Ok(session)
    }

    pub fn month(&self, args: MonthArgs) -> (i32, u32) {
        (
            args.year.unwrap_or_else(|| self.today.year()),
            args.month.unwrap_or_else(|| self.today.month()),
        )
    }
}
