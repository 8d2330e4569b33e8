//! # qb-auth
//!
//! QuickBlox session credentials.
//!
//! A session token is obtained outside this crate (from the QuickBlox admin
//! panel, a backend service, or another SDK) and handed to the client
//! together with the account's API endpoint.
//!
//! ## Security
//!
//! - Session tokens are redacted in Debug output
//! - Error messages never include token values
//!
//! ## Example
//!
//! ```rust,ignore
//! use quickblox_auth::{Credentials, QuickbloxCredentials};
//!
//! fn main() -> Result<(), quickblox_auth::Error> {
//!     // From environment variables
//!     let creds = QuickbloxCredentials::from_env()?;
//!     let client = creds.client()?;
//!     println!("talking to {}", creds.api_endpoint());
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;

pub use credentials::{Credentials, QuickbloxCredentials};
pub use error::{Error, ErrorKind, Result};

/// Environment variable holding the API endpoint.
pub const ENV_API_ENDPOINT: &str = "QB_API_ENDPOINT";

/// Environment variable holding the session token.
pub const ENV_SESSION_TOKEN: &str = "QB_SESSION_TOKEN";

/// Environment variable holding the application id.
pub const ENV_APPLICATION_ID: &str = "QB_APPLICATION_ID";
