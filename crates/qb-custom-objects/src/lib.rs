//! # qb-custom-objects
//!
//! QuickBlox Custom Objects client: records of user-defined classes stored
//! by the backend.
//!
//! ## Features
//!
//! - **Reads** - by id, by several ids, whole class, filtered/sorted/paged
//! - **Writes** - create, update, update with special operators, delete
//! - **Bulk** - create, update and delete up to 100 records per request
//! - **Permissions** - read the access rules of a record
//! - **Files** - upload, download and delete files in file fields
//! - **Callbacks** - [`CustomObjects`] runs each call in the background and
//!   reports to a delegate, with a [`Cancelable`] handle
//!
//! ## Example
//!
//! ```rust,ignore
//! use quickblox_custom_objects::{CustomObject, CustomObjectsClient, ExtendedRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quickblox_custom_objects::Error> {
//!     let client = CustomObjectsClient::new("https://api.quickblox.com", "session-token")?;
//!
//!     // Create
//!     let movie = client
//!         .create_object(&CustomObject::new("Movie").with_field("name", "Alien"))
//!         .await?;
//!
//!     // Query
//!     let request = ExtendedRequest::builder().gte("rating", 8).limit(10).build()?;
//!     let page = client.get_objects_extended("Movie", &request).await?;
//!     println!("{} top rated", page.len());
//!
//!     // Delete
//!     client.delete_object("Movie", movie.id.as_deref().unwrap_or_default()).await?;
//!
//!     Ok(())
//! }
//! ```

mod callback;
mod client;
mod error;
mod extended_request;
mod facade;
mod file;
mod object;
mod operators;
mod permissions;
mod results;
mod validate;

// Clients
pub use client::CustomObjectsClient;
pub use facade::CustomObjects;

// Callback plumbing
pub use callback::{with_context, Cancelable, Delegate, WithContext};

// Error types
pub use error::{Error, ErrorKind, Result};

// Request builders
pub use extended_request::{ExtendedRequest, ExtendedRequestBuilder, MAX_LIMIT};
pub use operators::SpecialUpdateOperators;

// Data types
pub use file::{content_type_for, CustomObjectFile, FileDownload, DEFAULT_CONTENT_TYPE};
pub use object::CustomObject;
pub use permissions::{AccessLevel, AccessRule, Permissions};
pub use results::{MultiDeleteResult, ObjectPermissions, PagedObjects};
pub use validate::MAX_BATCH_SIZE;

// Re-export qb-client types that users might need
pub use quickblox_client::{ClientConfig, ClientConfigBuilder, RetryConfig};
