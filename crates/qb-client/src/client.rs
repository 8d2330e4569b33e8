//! Core HTTP client with retry, compression, and QuickBlox-specific handling.

use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder, RequestMethod};
use crate::response::{parse_error_response, Response, ResponseExt};
use crate::retry::RetryPolicy;
use crate::TOKEN_HEADER;

/// HTTP client for QuickBlox APIs with built-in retry, compression, and error handling.
#[derive(Debug, Clone)]
pub struct QbHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl QbHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .redirect(same_origin_redirects(config.max_redirects))
            .user_agent(crate::USER_AGENT);

        builder = builder
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Create a PUT request builder.
    pub fn put(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Put, url)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Delete, url)
    }

    /// Execute a request with automatic retry handling.
    ///
    /// Non-success responses are decoded into [`ErrorKind`] values; a
    /// returned `Response` is always 2xx.
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut retry_policy = self
            .config
            .retry
            .as_ref()
            .map(|c| RetryPolicy::new(c.clone()));

        loop {
            let err = match self.execute_once(&request).await {
                Ok(response) => return response.check_quickblox_error().await,
                Err(err) => err,
            };

            let Some(policy) = retry_policy.as_mut() else {
                return Err(err);
            };
            if !policy.permits(request.method, &err) {
                return Err(err);
            }

            match policy.next_delay(err.retry_after()) {
                Some(delay) => {
                    warn!(
                        attempt = policy.attempt(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    return Err(Error::with_source(
                        ErrorKind::RetriesExhausted {
                            attempts: policy.attempt(),
                        },
                        err,
                    ));
                }
            }
        }
    }

    /// Execute a single request without retry logic.
    ///
    /// Retryable statuses (429 and 5xx gateway errors) come back as `Err` so
    /// the retry loop can see them; everything else is left to
    /// [`ResponseExt::check_quickblox_error`].
    async fn execute_once(&self, request: &RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        if let Some(ref token) = request.session_token {
            req = req.header(TOKEN_HEADER, token.as_str());
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if !request.query_params.is_empty() {
            req = req.query(&request.query_params);
        }

        if let Some(ref body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.json(value),
                RequestBody::Multipart { fields, file } => {
                    let mut form = reqwest::multipart::Form::new();
                    for (name, value) in fields {
                        form = form.text(name.clone(), value.clone());
                    }
                    let part = reqwest::multipart::Part::bytes(file.data.to_vec())
                        .file_name(file.file_name.clone())
                        .mime_str(&file.content_type)
                        .map_err(|e| {
                            Error::with_source(ErrorKind::Other(format!("Invalid content type: {}", e)), e)
                        })?;
                    req.multipart(form.part(file.field.clone(), part))
                }
            };
        }

        debug!(method = ?request.method, url = %request.url, "Sending request");

        let mut response = req.send().await?;

        // The redirect policy stops at another origin. Fetch that target
        // without the session headers.
        if request.method == RequestMethod::Get {
            if let Some(location) = cross_origin_location(&response) {
                debug!(host = location.host_str().unwrap_or_default(), "Following redirect to another origin");
                response = self.inner.get(location).send().await?;
            }
        }

        let status = response.status().as_u16();
        let content_length = response.content_length();
        if response.status().is_success() {
            debug!(status, content_length, "Response received");
        } else {
            info!(status, content_length, "Non-success response");
        }

        let response = Response::new(response);

        if status == 429 {
            return Err(parse_error_response(status, response.retry_after(), ""));
        }

        if matches!(status, 500 | 502 | 503 | 504) {
            return Err(Error::new(ErrorKind::Http {
                status,
                message: format!("Server error: {}", status),
            }));
        }

        Ok(response)
    }

    /// Execute a request and deserialize the JSON response.
    pub async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.execute(request).await?;
        response.json().await
    }
}

/// Follow redirects only while they stay on the origin of the first request.
///
/// Session headers are attached to every hop reqwest follows, so a hop to
/// another origin is handed back as a 3xx response instead.
fn same_origin_redirects(max: usize) -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() > max {
            return attempt.error("too many redirects");
        }
        let same_origin = attempt
            .previous()
            .first()
            .is_some_and(|first| first.origin() == attempt.url().origin());
        if same_origin {
            attempt.follow()
        } else {
            attempt.stop()
        }
    })
}

/// The `Location` of a redirect response, resolved against the response URL.
fn cross_origin_location(response: &reqwest::Response) -> Option<Url> {
    if !response.status().is_redirection() {
        return None;
    }
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)?
        .to_str()
        .ok()?;
    let target = response.url().join(location).ok()?;
    (target.origin() != response.url().origin()).then_some(target)
}
