//! Error types for qb-custom-objects.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Shorthand for an [`ErrorKind::InvalidInput`] error.
    pub fn invalid_input(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput {
            code,
            message: message.into(),
        })
    }

    /// The operation was cancelled through its [`Cancelable`](crate::Cancelable).
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Validation code of an [`ErrorKind::InvalidInput`] error.
    pub fn input_code(&self) -> Option<&'static str> {
        match self.kind {
            ErrorKind::InvalidInput { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The HTTP-layer error this error was built from, if any.
    pub fn client_error(&self) -> Option<&quickblox_client::Error> {
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<quickblox_client::Error>())
    }

    /// Returns true if repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        self.client_error().is_some_and(|e| e.is_retryable())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),
    #[error("Auth error: {0}")]
    Auth(String),
    #[error("{code}: {message}")]
    InvalidInput { code: &'static str, message: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("{0}")]
    Other(String),
}

impl From<quickblox_client::Error> for Error {
    fn from(err: quickblox_client::Error) -> Self {
        let kind = match &err.kind {
            quickblox_client::ErrorKind::NotFound(message) => ErrorKind::NotFound(message.clone()),
            _ => ErrorKind::Client(err.to_string()),
        };
        Error { kind, source: Some(Box::new(err)) }
    }
}

impl From<quickblox_auth::Error> for Error {
    fn from(err: quickblox_auth::Error) -> Self {
        Error { kind: ErrorKind::Auth(err.to_string()), source: Some(Box::new(err)) }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error { kind: ErrorKind::Other(format!("JSON error: {}", err)), source: Some(Box::new(err)) }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error { kind: ErrorKind::Io(err.to_string()), source: Some(Box::new(err)) }
    }
}
