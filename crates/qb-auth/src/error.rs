//! Error types for qb-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

/// Result type alias for qb-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for qb-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Invalid credentials configuration.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<quickblox_client::Error> for Error {
    fn from(err: quickblox_client::Error) -> Self {
        let message = err.to_string();
        let sanitized = if message.to_ascii_lowercase().contains("token") {
            "Client error (details redacted for security)".to_string()
        } else {
            message
        };
        Error::with_source(ErrorKind::Config(sanitized), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid API endpoint: {}", err)), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::EnvVar("QB_SESSION_TOKEN".to_string());
        assert_eq!(err.to_string(), "Environment variable not set: QB_SESSION_TOKEN");

        let err = ErrorKind::InvalidCredentials("session token is empty".to_string());
        assert_eq!(err.to_string(), "Invalid credentials: session token is empty");
    }

    #[test]
    fn test_client_errors_mentioning_tokens_are_redacted() {
        let client_err = quickblox_client::Error::new(quickblox_client::ErrorKind::Authentication(
            "Token 1234abcd is expired".to_string(),
        ));
        let err: Error = client_err.into();
        assert!(!err.to_string().contains("1234abcd"));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_url_errors_convert() {
        let err: Error = url::Url::parse("nope").unwrap_err().into();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }
}
