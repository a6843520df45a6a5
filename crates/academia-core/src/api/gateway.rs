//! The single HTTP chokepoint every backend call passes through.
//!
//! Two steps wrap each transport call:
//! - `decorate_request` attaches the current bearer credential, if any
//! - `observe_response` turns failures into `ApiError` and, on a 401 from
//!   any endpoint, clears the session and redirects to the login surface
//!
//! The error is always returned to the caller after the side effect runs.
//! Each call is attempted exactly once; there are no retries.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

use crate::auth::SessionStore;
use crate::navigation::{Navigator, LOGIN_PATH};

use super::ApiError;

/// Backend address used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings fixed when the gateway is built
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// Attach the session's credential as a bearer `Authorization` header.
/// Without a session the request goes out unauthenticated.
pub fn decorate_request(sessions: &SessionStore, request: RequestBuilder) -> RequestBuilder {
    match sessions.credential() {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Check a received response.
///
/// Success passes through untouched. A 401 invalidates the session and
/// redirects to the login path before the error is returned. Every other
/// failure status is returned as-is with no side effect.
pub async fn observe_response(
    sessions: &SessionStore,
    navigator: &dyn Navigator,
    response: Response,
) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        warn!(url = %response.url(), "Credential rejected, ending session");
        if let Err(e) = sessions.invalidate() {
            error!(error = %e, "Failed to clear session after 401");
        }
        navigator.redirect(LOGIN_PATH);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

/// HTTP client for the backend.
/// Clone is cheap - reqwest::Client and the session store share their state.
#[derive(Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
    sessions: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl Gateway {
    pub fn new(
        config: &GatewayConfig,
        sessions: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sessions,
            navigator,
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request. Send it through `send` so the session policy applies.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Decorate, send once, and observe.
    ///
    /// The credential is read when this is called. A transport failure (no
    /// response) is returned as `ApiError::Network` and leaves the session
    /// alone.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = decorate_request(&self.sessions, request);
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed before a response arrived");
            ApiError::Network(e)
        })?;
        debug!(status = %response.status(), url = %response.url(), "Response received");
        observe_response(&self.sessions, self.navigator.as_ref(), response).await
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        // Mutations may answer with an empty body
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text)
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", path, e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::parse_json(response, path).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::parse_json(response, path).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::parse_json(response, path).await
    }

    /// POST without a body, ignoring whatever comes back
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}
