//! QuickBlox Custom Objects API client.
//!
//! This client wraps `QuickbloxClient` from `qb-client` and provides typed
//! methods for every Custom Objects operation: reads, writes, bulk writes,
//! permissions and file fields.

use quickblox_auth::Credentials;
use quickblox_client::{security::url as url_security, ClientConfig, QuickbloxClient};

use crate::error::{Error, Result};

mod bulk;
mod files;
mod objects;
mod permissions;
mod records;

/// Custom Objects API client.
///
/// Every method validates its arguments, sends exactly one request and
/// returns the decoded result. Cloning is cheap; clones share one connection
/// pool.
///
/// # Example
///
/// ```rust,ignore
/// use quickblox_custom_objects::{CustomObject, CustomObjectsClient};
///
/// let client = CustomObjectsClient::new("https://api.quickblox.com", "session-token")?;
///
/// let created = client
///     .create_object(&CustomObject::new("Movie").with_field("name", "Alien"))
///     .await?;
/// let fetched = client.get_object("Movie", created.id.as_deref().unwrap()).await?;
/// client.delete_object("Movie", created.id.as_deref().unwrap()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomObjectsClient {
    client: QuickbloxClient,
}

impl CustomObjectsClient {
    /// Create a new client with the given API endpoint and session token.
    pub fn new(api_endpoint: impl Into<String>, session_token: impl Into<String>) -> Result<Self> {
        let client = QuickbloxClient::new(api_endpoint, session_token)?;
        Ok(Self { client })
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(
        api_endpoint: impl Into<String>,
        session_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = QuickbloxClient::with_config(api_endpoint, session_token, config)?;
        Ok(Self { client })
    }

    /// Create a client from any [`Credentials`].
    pub fn from_credentials(credentials: &impl Credentials, config: ClientConfig) -> Result<Self> {
        if !credentials.is_valid() {
            return Err(quickblox_auth::Error::new(quickblox_auth::ErrorKind::InvalidCredentials(
                "API endpoint and session token are required".to_string(),
            ))
            .into());
        }
        Self::with_config(credentials.api_endpoint(), credentials.session_token(), config)
    }

    /// Create a client from an existing QuickbloxClient.
    pub fn from_client(client: QuickbloxClient) -> Self {
        Self { client }
    }

    /// Get the underlying QuickbloxClient.
    pub fn inner(&self) -> &QuickbloxClient {
        &self.client
    }

    /// Get the API endpoint.
    pub fn api_endpoint(&self) -> &str {
        self.client.api_endpoint()
    }
}

/// Path of a class collection, or of records of it when `ids` is non-empty.
///
/// Callers validate first; this only guards against a missed check.
pub(crate) fn data_path(class_name: &str, ids: &[&str]) -> Result<String> {
    url_security::data_path(class_name, ids)
        .ok_or_else(|| Error::invalid_input("INVALID_CLASS_NAME", "Invalid class name or ID"))
}
