//! REST API client for the portal backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds (tests, tooling): every call returns
//! [`ApiError::Unavailable`] since the endpoints are only reachable from the
//! browser bundle.
//!
//! Credentials are injected per request from the [`Credentials`] passed to
//! each authenticated call; the client itself holds no auth state.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying the backend's
//! `{ "message": ... }` text when present, so the login form can show it.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "csr"))]
use super::types::ApiMessage;
use super::types::{CurrentUser, LoginRequest, LoginResponse, Notification, RegisterRequest, RegisterResponse};
use crate::config::ClientConfig;
use crate::state::session::Credentials;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const ME_PATH: &str = "/api/auth/me";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const NOTIFICATIONS_PATH: &str = "/api/notifications";
pub const HEALTH_PATH: &str = "/api/health";

/// Errors produced by REST calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// Not running in a browser.
    #[error("not available outside the browser")]
    Unavailable,
}

/// The authentication collaborator used by the session flows.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /api/auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// `GET /api/auth/me` with the given credentials.
    async fn current_user(&self, credentials: &Credentials) -> Result<CurrentUser, ApiError>;
}

#[cfg(any(test, feature = "csr"))]
pub(crate) fn notification_read_path(notification_id: i64) -> String {
    format!("{NOTIFICATIONS_PATH}/{notification_id}/read")
}

/// Build a status error from a response body, keeping the backend message if
/// the body is `{ "message": ... }`.
#[cfg(any(test, feature = "csr"))]
pub(crate) fn status_error(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ApiMessage>(body) {
        Ok(parsed) if !parsed.message.trim().is_empty() => Some(parsed.message),
        _ => None,
    };
    ApiError::Status { status, message }
}

/// HTTP client bound to the backend origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Create an account via `POST /api/auth/register`. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or is rejected (e.g. 409 for a taken username).
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let req = gloo_net::http::Request::post(&self.url(REGISTER_PATH))
                .json(request)
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(send(req).await?).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    /// List the current user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the token is rejected.
    pub async fn notifications(&self, credentials: &Credentials) -> Result<Vec<Notification>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = authorize(gloo_net::http::Request::get(&self.url(NOTIFICATIONS_PATH)), credentials);
            let req = builder.build().map_err(|e| ApiError::Network(e.to_string()))?;
            let list: super::types::NotificationList = read_json(send(req).await?).await?;
            Ok(list.items)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            Err(ApiError::Unavailable)
        }
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the notification is not the user's.
    pub async fn mark_notification_read(&self, credentials: &Credentials, notification_id: i64) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let url = self.url(&notification_read_path(notification_id));
            let req = authorize(gloo_net::http::Request::post(&url), credentials)
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let resp = send(req).await?;
            if !resp.ok() {
                return Err(read_status_error(resp).await);
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (credentials, notification_id);
            Err(ApiError::Unavailable)
        }
    }

    /// Backend liveness via `GET /api/health`; returns the reported status.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<String, ApiError> {
        #[cfg(feature = "csr")]
        {
            let req = gloo_net::http::Request::get(&self.url(HEALTH_PATH))
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let body: super::types::HealthStatus = read_json(send(req).await?).await?;
            Ok(body.status)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }
}

impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let req = gloo_net::http::Request::post(&self.url(LOGIN_PATH))
                .json(request)
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(send(req).await?).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    async fn current_user(&self, credentials: &Credentials) -> Result<CurrentUser, ApiError> {
        #[cfg(feature = "csr")]
        {
            let req = authorize(gloo_net::http::Request::get(&self.url(ME_PATH)), credentials)
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(send(req).await?).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            Err(ApiError::Unavailable)
        }
    }
}

/// Attach the session's `Authorization` header to one request.
#[cfg(feature = "csr")]
fn authorize(builder: gloo_net::http::RequestBuilder, credentials: &Credentials) -> gloo_net::http::RequestBuilder {
    builder.header("Authorization", credentials.header_value())
}

#[cfg(feature = "csr")]
async fn send(req: gloo_net::http::Request) -> Result<gloo_net::http::Response, ApiError> {
    req.send().await.map_err(|e| ApiError::Network(e.to_string()))
}

#[cfg(feature = "csr")]
async fn read_status_error(resp: gloo_net::http::Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    log::warn!("request to {} failed with status {status}", resp.url());
    status_error(status, &body)
}

#[cfg(feature = "csr")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        return Err(read_status_error(resp).await);
    }
    resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
}
