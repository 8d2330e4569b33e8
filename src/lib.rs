//! # quickblox-sdk
//!
//! A QuickBlox API client library for Rust.
//!
//! This library provides typed access to the QuickBlox Custom Objects API
//! with retry logic, error decoding and callback-style cancelable calls.
//!
//! ## Security
//!
//! - Session tokens are redacted in Debug output
//! - Tracing spans skip payloads and credentials
//! - Error messages sanitize anything that looks like a token
//!
//! ## Crates
//!
//! - **quickblox-client** - Core HTTP client infrastructure with retry, compression, rate limiting
//! - **quickblox-auth** - Session credentials from values or environment
//! - **quickblox-custom-objects** - Custom Objects: CRUD, bulk, permissions, file fields
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quickblox_sdk::{CustomObject, CustomObjectsClient, QuickbloxCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // QB_SESSION_TOKEN, optionally QB_API_ENDPOINT
//!     let creds = QuickbloxCredentials::from_env()?;
//!     let client = CustomObjectsClient::from_credentials(&creds, Default::default())?;
//!
//!     let page = client.get_objects("Movie").await?;
//!     for movie in page {
//!         println!("{:?}", movie.field("name"));
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use quickblox_auth as auth;
#[cfg(feature = "client")]
pub use quickblox_client as client;
#[cfg(feature = "custom-objects")]
pub use quickblox_custom_objects as custom_objects;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use quickblox_auth::{Credentials, QuickbloxCredentials};
#[cfg(feature = "client")]
pub use quickblox_client::{ClientConfig, QuickbloxClient};
#[cfg(feature = "custom-objects")]
pub use quickblox_custom_objects::{
    with_context, Cancelable, CustomObject, CustomObjectFile, CustomObjects, CustomObjectsClient,
    ExtendedRequest, SpecialUpdateOperators,
};
