//! REST API client for the column/post/user endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store talks to the server only through [`ColumnApi`], so tests can
//! substitute a recording mock. [`HttpApi`] is the `reqwest` implementation.
//! It owns the default `Authorization: Bearer` credential that login and the
//! navigation guard install for subsequent requests.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses, transport failures and malformed bodies all surface as
//! [`ApiError`]. Nothing here retries; the HTTP client's own timeouts bound
//! each call.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{PoisonError, RwLock};

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use super::types::{ColumnRecord, Envelope, ListData, LoginRequest, LoginResponse, PostRecord, UserRecord};
use crate::config::HttpTimeouts;

pub const COLUMNS_PATH: &str = "/columns";
pub const CURRENT_USER_PATH: &str = "/user/current";
pub const LOGIN_PATH: &str = "/user/login";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("API request failed: {0}")]
    Request(String),

    /// The server answered with a non-success HTTP status.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body was not the expected envelope.
    #[error("API response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// `true` for 401/403 answers, i.e. a missing, expired or invalid token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Typed access to the remote API, one method per endpoint.
#[async_trait::async_trait]
pub trait ColumnApi: Send + Sync {
    /// Install (or with `None`, drop) the bearer token sent on later requests.
    fn set_bearer_token(&self, token: Option<&str>);

    /// `GET /columns`
    async fn fetch_columns(&self) -> Result<Vec<ColumnRecord>, ApiError>;

    /// `GET /columns/{id}`
    async fn fetch_column(&self, id: &str) -> Result<ColumnRecord, ApiError>;

    /// `GET /columns/{id}/posts`
    async fn fetch_posts(&self, column_id: &str) -> Result<Vec<PostRecord>, ApiError>;

    /// `GET /user/current`
    async fn fetch_current_user(&self) -> Result<UserRecord, ApiError>;

    /// `POST /user/login`
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl HttpApi {
    /// Build a client rooted at `base_url` (trailing slashes are ignored).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest` client fails to build.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), bearer: RwLock::new(None) })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current `Authorization` header value, if a token is installed.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            .map(bearer_header_value)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let mut request = self.http.get(endpoint_url(&self.base_url, path));
        if let Some(value) = self.authorization() {
            request = request.header(AUTHORIZATION, value);
        }
        Self::send(request, path).await
    }

    async fn post<B: serde::Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let mut request = self.http.post(endpoint_url(&self.base_url, path)).json(body);
        if let Some(value) = self.authorization() {
            request = request.header(AUTHORIZATION, value);
        }
        Self::send(request, path).await
    }

    async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder, path: &str) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        tracing::debug!(%path, status, "api response");
        parse_envelope(status, &text)
    }
}

#[async_trait::async_trait]
impl ColumnApi for HttpApi {
    fn set_bearer_token(&self, token: Option<&str>) {
        let mut bearer = self.bearer.write().unwrap_or_else(PoisonError::into_inner);
        *bearer = token.filter(|t| !t.is_empty()).map(str::to_owned);
    }

    async fn fetch_columns(&self) -> Result<Vec<ColumnRecord>, ApiError> {
        let data: ListData<ColumnRecord> = self.get(COLUMNS_PATH).await?;
        Ok(data.list)
    }

    async fn fetch_column(&self, id: &str) -> Result<ColumnRecord, ApiError> {
        self.get(&column_endpoint(id)).await
    }

    async fn fetch_posts(&self, column_id: &str) -> Result<Vec<PostRecord>, ApiError> {
        let data: ListData<PostRecord> = self.get(&column_posts_endpoint(column_id)).await?;
        Ok(data.list)
    }

    async fn fetch_current_user(&self) -> Result<UserRecord, ApiError> {
        self.get(CURRENT_USER_PATH).await
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post(LOGIN_PATH, credentials).await
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn column_endpoint(id: &str) -> String {
    format!("{COLUMNS_PATH}/{id}")
}

fn column_posts_endpoint(column_id: &str) -> String {
    format!("{COLUMNS_PATH}/{column_id}/posts")
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn bearer_header_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Check the status and unwrap the `data` field of a response envelope.
fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, body: body.to_owned() });
    }
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(envelope.data)
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "api_mock.rs"]
pub mod test_helpers;
