//! HTTP response handling with QuickBlox-specific extensions.

use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around HTTP response with additional functionality.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        let status = self.status();
        (200..300).contains(&status)
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Retry-After header as a Duration.
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")?
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Get the response body as bytes.
    pub async fn bytes(self) -> Result<bytes::Bytes> {
        self.inner.bytes().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.inner.bytes().await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }
}

/// Extension trait for processing QuickBlox API responses.
pub trait ResponseExt {
    /// Check for QuickBlox API errors and convert to appropriate error type.
    fn check_quickblox_error(self) -> impl std::future::Future<Output = Result<Response>> + Send;
}

impl ResponseExt for Response {
    async fn check_quickblox_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let retry_after = self.retry_after();
        let body = self.text().await.unwrap_or_default();
        Err(parse_error_response(status, retry_after, &body))
    }
}

/// Convert a non-success status and its body into an error.
///
/// The backend reports errors as `{"errors": [..]}` or
/// `{"errors": {"field": [..]}}`; `base` entries are reported without a
/// field prefix.
pub(crate) fn parse_error_response(status: u16, retry_after: Option<Duration>, body: &str) -> Error {
    if status == 429 {
        return Error::new(ErrorKind::RateLimited { retry_after });
    }

    let messages: Vec<String> = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .map(|value| extract_messages(&value))
        .unwrap_or_default()
        .iter()
        .map(|m| sanitize_error_message(m))
        .collect();

    let summary = if messages.is_empty() {
        sanitize_error_message(body)
    } else {
        messages.join("; ")
    };

    let kind = match status {
        401 => ErrorKind::Authentication(summary),
        403 => ErrorKind::Authorization(summary),
        404 => ErrorKind::NotFound(summary),
        422 => ErrorKind::Validation { status, messages },
        _ if !messages.is_empty() => ErrorKind::Api { status, messages },
        _ => ErrorKind::Http {
            status,
            message: summary,
        },
    };

    Error::new(kind)
}

fn extract_messages(value: &serde_json::Value) -> Vec<String> {
    use serde_json::Value;

    let errors = match value.get("errors").or_else(|| value.get("message")) {
        Some(errors) => errors,
        None => return Vec::new(),
    };

    match errors {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items.iter().filter_map(value_to_message).collect(),
        Value::Object(fields) => fields
            .iter()
            .flat_map(|(field, problems)| {
                let problems: Vec<String> = match problems {
                    Value::Array(items) => items.iter().filter_map(value_to_message).collect(),
                    other => value_to_message(other).into_iter().collect(),
                };
                problems.into_iter().map(move |problem| {
                    if field == "base" {
                        problem
                    } else {
                        format!("{} {}", field, problem)
                    }
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn value_to_message(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// This function:
/// - Truncates messages longer than 500 characters
/// - Redacts anything that looks like a session token
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    static HEADER_PATTERN: OnceLock<regex_lite::Regex> = OnceLock::new();
    static HEX_TOKEN_PATTERN: OnceLock<regex_lite::Regex> = OnceLock::new();

    let header_pattern = HEADER_PATTERN.get_or_init(|| {
        regex_lite::Regex::new(r"(?i)(qb-token|token)([=:]\s*)[A-Za-z0-9._\-]+")
            .expect("static pattern is valid")
    });
    let hex_token_pattern = HEX_TOKEN_PATTERN.get_or_init(|| {
        regex_lite::Regex::new(r"\b[0-9a-f]{40,}\b").expect("static pattern is valid")
    });

    let mut sanitized = header_pattern
        .replace_all(message, "${1}${2}[REDACTED]")
        .to_string();
    sanitized = hex_token_pattern
        .replace_all(&sanitized, "[REDACTED_TOKEN]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
