//! High-level QuickBlox client that authenticates every request.
//!
//! This module provides `QuickbloxClient`, which combines the API endpoint and
//! session token with an HTTP client.
//!
//! ## Security
//!
//! - Session tokens are redacted in Debug output
//! - Session headers are never sent to another origin on redirect

use serde::de::DeserializeOwned;

use crate::client::QbHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::RequestBuilder;
use crate::response::Response;
use crate::{API_VERSION_HEADER, DEFAULT_API_VERSION};

/// High-level QuickBlox API client.
///
/// Every request built through this client carries the `QB-Token` and
/// `QuickBlox-REST-API-Version` headers. It is meant to be wrapped by
/// module-specific crates (qb-custom-objects).
///
/// # Example
///
/// ```rust,ignore
/// use quickblox_client::QuickbloxClient;
///
/// let client = QuickbloxClient::new("https://api.quickblox.com", "session-token")?;
/// let movie: serde_json::Value = client
///     .execute_json(client.get("data/Movie/5f4b8c2e9d1a3b0012ab34cd.json"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct QuickbloxClient {
    http: QbHttpClient,
    api_endpoint: String,
    session_token: String,
    api_version: String,
}

impl std::fmt::Debug for QuickbloxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickbloxClient")
            .field("api_endpoint", &self.api_endpoint)
            .field("session_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl QuickbloxClient {
    /// Create a new client for the given API endpoint and session token.
    pub fn new(api_endpoint: impl Into<String>, session_token: impl Into<String>) -> Result<Self> {
        Self::with_config(api_endpoint, session_token, ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    pub fn with_config(
        api_endpoint: impl Into<String>,
        session_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let api_endpoint = api_endpoint.into().trim_end_matches('/').to_string();
        url::Url::parse(&api_endpoint)?;

        let http = QbHttpClient::new(config)?;
        Ok(Self {
            http,
            api_endpoint,
            session_token: session_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the value sent in the `QuickBlox-REST-API-Version` header.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the API endpoint.
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Get the session token.
    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    /// Get the REST API version header value.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the full URL for a path.
    ///
    /// Absolute URLs are returned unchanged.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.api_endpoint, path.trim_start_matches('/'))
        }
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .session_token(&self.session_token)
            .header(API_VERSION_HEADER, &self.api_version)
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.authenticate(self.http.get(self.url(url)))
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.authenticate(self.http.post(self.url(url)))
    }

    /// Create a PUT request builder with authentication.
    pub fn put(&self, url: &str) -> RequestBuilder {
        self.authenticate(self.http.put(self.url(url)))
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.authenticate(self.http.delete(self.url(url)))
    }

    /// Execute a request and return the raw response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(request).await
    }

    /// Execute a request and deserialize its JSON body.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.http.send_json(request).await
    }
}
