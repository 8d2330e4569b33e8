//! Credentials trait and implementations.
//!
//! All credential types implement custom Debug to redact sensitive data.

use quickblox_client::{ClientConfig, QuickbloxClient, DEFAULT_API_ENDPOINT};
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::{ENV_API_ENDPOINT, ENV_APPLICATION_ID, ENV_SESSION_TOKEN};

/// Trait for QuickBlox credentials.
pub trait Credentials: Send + Sync {
    /// Get the API endpoint (e.g. `https://api.quickblox.com`).
    fn api_endpoint(&self) -> &str;

    /// Get the session token.
    fn session_token(&self) -> &str;

    /// Get the application id the session belongs to, when known.
    fn application_id(&self) -> Option<u64> {
        None
    }

    /// Returns true if the credentials appear to be valid (non-empty).
    fn is_valid(&self) -> bool {
        !self.api_endpoint().is_empty() && !self.session_token().is_empty()
    }
}

/// Session-token credentials for one QuickBlox account.
///
/// The session token is redacted in Debug output to prevent accidental
/// exposure in logs.
#[derive(Clone)]
pub struct QuickbloxCredentials {
    api_endpoint: String,
    session_token: String,
    application_id: Option<u64>,
}

impl std::fmt::Debug for QuickbloxCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickbloxCredentials")
            .field("api_endpoint", &self.api_endpoint)
            .field("session_token", &"[REDACTED]")
            .field("application_id", &self.application_id)
            .finish()
    }
}

impl QuickbloxCredentials {
    /// Create new credentials with the given values.
    pub fn new(api_endpoint: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into().trim_end_matches('/').to_string(),
            session_token: session_token.into(),
            application_id: None,
        }
    }

    /// Credentials for the default public endpoint.
    pub fn with_default_endpoint(session_token: impl Into<String>) -> Self {
        Self::new(DEFAULT_API_ENDPOINT, session_token)
    }

    /// Attach the application id.
    pub fn with_application_id(mut self, application_id: u64) -> Self {
        self.application_id = Some(application_id);
        self
    }

    /// Replace the session token (e.g. after the previous one expired).
    pub fn set_session_token(&mut self, token: impl Into<String>) {
        self.session_token = token.into();
    }

    /// Load credentials from environment variables.
    ///
    /// Required:
    /// - `QB_SESSION_TOKEN`
    ///
    /// Optional:
    /// - `QB_API_ENDPOINT` (default: `https://api.quickblox.com`)
    /// - `QB_APPLICATION_ID`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    ///
    /// `from_env` is this function over the process environment; tests and
    /// configuration layers can pass their own source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_token = lookup(ENV_SESSION_TOKEN)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::new(ErrorKind::EnvVar(ENV_SESSION_TOKEN.to_string())))?;

        let api_endpoint = lookup(ENV_API_ENDPOINT)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let application_id = match lookup(ENV_APPLICATION_ID).filter(|v| !v.is_empty()) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                Error::with_source(
                    ErrorKind::InvalidCredentials(format!("{} is not a number", ENV_APPLICATION_ID)),
                    e,
                )
            })?),
            None => None,
        };

        let mut creds = Self::new(api_endpoint, session_token);
        creds.application_id = application_id;
        creds.validate()?;

        debug!(api_endpoint = %creds.api_endpoint, "Loaded credentials");
        Ok(creds)
    }

    /// Check that the endpoint is a URL and the token is present.
    pub fn validate(&self) -> Result<()> {
        if self.session_token.trim().is_empty() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "session token is empty".to_string(),
            )));
        }
        let url = url::Url::parse(&self.api_endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::new(ErrorKind::InvalidCredentials(format!(
                "unsupported endpoint scheme: {}",
                url.scheme()
            ))));
        }
        Ok(())
    }

    /// Build an authenticated client with default configuration.
    pub fn client(&self) -> Result<QuickbloxClient> {
        self.client_with_config(ClientConfig::default())
    }

    /// Build an authenticated client with custom configuration.
    pub fn client_with_config(&self, config: ClientConfig) -> Result<QuickbloxClient> {
        self.validate()?;
        Ok(QuickbloxClient::with_config(
            &self.api_endpoint,
            &self.session_token,
            config,
        )?)
    }
}

impl Credentials for QuickbloxCredentials {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn session_token(&self) -> &str {
        &self.session_token
    }

    fn application_id(&self) -> Option<u64> {
        self.application_id
    }
}
