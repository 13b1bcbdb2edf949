//! HTTP plumbing shared by every resource.

use std::time::Instant;

use reqwest::{Method, RequestBuilder, multipart::Form};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use greedible_auth::Session;

use crate::{ApiError, Backend, ClientConfig};

pub(crate) enum Body {
    Empty,
    Json(Value),
    Multipart(Form),
}

impl Body {
    pub(crate) fn json<T: Serialize + ?Sized>(body: &T) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(Body::Json)
            .map_err(|e| ApiError::Decode(format!("could not encode request body: {e}")))
    }
}

/// Typed client for both Greedible backends.
///
/// Holds one connection pool; the caller's session is passed to every call
/// and never stored.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to construct HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL of a path on `backend`. Also used for image paths the
    /// backend returns relative to its root.
    pub fn url(&self, backend: Backend, path: &str) -> String {
        format!("{}{}", self.config.base_url(backend), path)
    }

    fn build(
        &self,
        method: Method,
        backend: Backend,
        path: &str,
        session: Option<&Session>,
        body: Body,
        request_id: Uuid,
    ) -> Result<RequestBuilder, ApiError> {
        let mut req = self
            .http
            .request(method, self.url(backend, path))
            .header("x-request-id", request_id.to_string());

        if let Some(session) = session {
            if session.token().trim().is_empty() {
                return Err(ApiError::MissingToken);
            }
            req = req.bearer_auth(session.token());
        }

        Ok(match body {
            Body::Empty => req,
            Body::Json(value) => req.json(&value),
            Body::Multipart(form) => req.multipart(form),
        })
    }

    /// Send one request and return its JSON body (`Null` when empty).
    ///
    /// Non-success statuses and `{"success": false}` bodies become
    /// `ApiError::Status` carrying the backend's `message`, else its `error`,
    /// else `fallback`.
    pub(crate) async fn dispatch(
        &self,
        method: Method,
        backend: Backend,
        path: &str,
        session: Option<&Session>,
        body: Body,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        let request_id = Uuid::now_v7();
        let req = self.build(method.clone(), backend, path, session, body, request_id)?;

        debug!(%method, path, %request_id, "sending request");
        let started = Instant::now();

        let resp = req.send().await.map_err(|e| {
            warn!(%method, path, %request_id, error = %e, "request failed");
            ApiError::from(e)
        })?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        debug!(
            %method,
            path,
            %request_id,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        let parsed: Option<Value> = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(parsed.as_ref(), fallback),
            });
        }

        match parsed {
            Some(value) if value.get("success") == Some(&Value::Bool(false)) => {
                Err(ApiError::Status {
                    status: status.as_u16(),
                    message: error_message(Some(&value), fallback),
                })
            }
            Some(value) => Ok(value),
            None if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Value::Null),
            None => Err(ApiError::Decode(format!("{path}: response is not JSON"))),
        }
    }

    pub(crate) async fn get(
        &self,
        session: &Session,
        backend: Backend,
        path: &str,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        self.dispatch(Method::GET, backend, path, Some(session), Body::Empty, fallback)
            .await
    }

    pub(crate) async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        session: Option<&Session>,
        backend: Backend,
        path: &str,
        body: &T,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        let body = Body::json(body)?;
        self.dispatch(method, backend, path, session, body, fallback)
            .await
    }

    pub(crate) async fn delete(
        &self,
        session: &Session,
        backend: Backend,
        path: &str,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        self.dispatch(Method::DELETE, backend, path, Some(session), Body::Empty, fallback)
            .await
    }
}

fn error_message(body: Option<&Value>, fallback: &str) -> String {
    body.and_then(|b| {
        ["message", "error"].iter().find_map(|key| {
            b.get(*key)
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
        })
    })
    .map(str::to_string)
    .unwrap_or_else(|| fallback.to_string())
}
