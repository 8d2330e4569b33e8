//! # qb-client
//!
//! Core HTTP client infrastructure for QuickBlox APIs.
//!
//! This crate provides the foundational HTTP client with:
//! - Automatic retry with exponential backoff and jitter
//! - Compression support (gzip, deflate)
//! - Rate limit detection and handling
//! - Multipart uploads for file fields
//! - Connection pooling
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (qb-custom-objects)                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   QuickbloxClient                           │
//! │  - Holds endpoint + session token + HTTP client             │
//! │  - Builds authenticated requests, decodes JSON responses    │
//! │  - Adds the QB-Token and API version headers                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    QbHttpClient                             │
//! │  - Raw HTTP with retry, compression, rate limiting          │
//! │  - Response handling and backend error decoding             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use quickblox_client::QuickbloxClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quickblox_client::Error> {
//!     let client = QuickbloxClient::new("https://api.quickblox.com", "session-token")?;
//!
//!     let page: serde_json::Value = client.execute_json(client.get("data/Movie.json")).await?;
//!     println!("{}", page["items"]);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod quickblox_client;
mod request;
mod response;
mod retry;
pub mod security;

pub use client::QbHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use quickblox_client::QuickbloxClient;
pub use request::{FilePart, RequestBuilder, RequestMethod};
pub use response::{Response, ResponseExt};
pub use retry::{BackoffStrategy, RetryConfig, RetryPolicy};

/// Default QuickBlox API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.quickblox.com";

/// Default value of the `QuickBlox-REST-API-Version` header.
pub const DEFAULT_API_VERSION: &str = "0.1.1";

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "QB-Token";

/// Header carrying the REST API version.
pub const API_VERSION_HEADER: &str = "QuickBlox-REST-API-Version";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("quickblox-sdk/", env!("CARGO_PKG_VERSION"));
