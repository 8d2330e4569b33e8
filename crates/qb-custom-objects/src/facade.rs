//! Callback-style facade over [`CustomObjectsClient`].
//!
//! Every method starts the request on a tokio runtime and returns a
//! [`Cancelable`] right away. The delegate is called exactly once, with the
//! decoded result, an error, or [`ErrorKind::Cancelled`](crate::ErrorKind::Cancelled).
//!
//! ```rust,ignore
//! use quickblox_custom_objects::{
//!     with_context, CustomObject, CustomObjects, CustomObjectsClient, PagedObjects, Result,
//! };
//!
//! let objects = CustomObjects::new(CustomObjectsClient::new(endpoint, token)?)?;
//!
//! // Closure delegates name their result type.
//! let request = objects.get_objects("Movie", |result: Result<PagedObjects>| match result {
//!     Ok(page) => println!("{} movies", page.len()),
//!     Err(e) => eprintln!("failed: {}", e),
//! });
//!
//! // Same call, correlated with a caller value.
//! objects.get_object("Movie", id, with_context(42usize, |result: Result<CustomObject>, row: usize| {
//!     println!("row {}: {:?}", row, result.map(|m| m.id));
//! }));
//!
//! request.cancel();
//! ```

use tokio::runtime::Handle;

use crate::callback::{self, Cancelable, Delegate};
use crate::client::CustomObjectsClient;
use crate::error::{Error, ErrorKind, Result};
use crate::extended_request::ExtendedRequest;
use crate::file::{CustomObjectFile, FileDownload};
use crate::object::CustomObject;
use crate::operators::SpecialUpdateOperators;
use crate::results::{MultiDeleteResult, ObjectPermissions, PagedObjects};

fn owned_ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn borrowed_ids(ids: &[String]) -> Vec<&str> {
    ids.iter().map(String::as_str).collect()
}

/// Custom Objects operations with completion delegates.
#[derive(Debug, Clone)]
pub struct CustomObjects {
    client: CustomObjectsClient,
    runtime: Handle,
}

impl CustomObjects {
    /// Create a facade that runs requests on the current tokio runtime.
    pub fn new(client: CustomObjectsClient) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| Error {
            kind: ErrorKind::Runtime("no tokio runtime is running".to_string()),
            source: Some(Box::new(e)),
        })?;
        Ok(Self::with_runtime(client, runtime))
    }

    /// Create a facade that runs requests on the given runtime.
    pub fn with_runtime(client: CustomObjectsClient, runtime: Handle) -> Self {
        Self { client, runtime }
    }

    /// Get the underlying async client.
    pub fn client(&self) -> &CustomObjectsClient {
        &self.client
    }

    /// Fetch one record by id. A missing record is delivered as `NotFound`.
    pub fn get_object(&self, class_name: &str, id: &str, delegate: impl Delegate<CustomObject>) -> Cancelable {
        let client = self.client.clone();
        let class_name = class_name.to_string();
        let id = id.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.get_object(&class_name, &id).await },
            delegate,
        )
    }

    /// Fetch several records by id (up to 100); missing ids are left out.
    pub fn get_objects_by_ids(
        &self,
        class_name: &str,
        ids: &[&str],
        delegate: impl Delegate<PagedObjects>,
    ) -> Cancelable {
        let client = self.client.clone();
        let class_name = class_name.to_string();
        let ids = owned_ids(ids);
        callback::spawn(
            &self.runtime,
            async move { client.get_objects_by_ids(&class_name, &borrowed_ids(&ids)).await },
            delegate,
        )
    }

    /// Fetch the first page of records of a class.
    pub fn get_objects(&self, class_name: &str, delegate: impl Delegate<PagedObjects>) -> Cancelable {
        let client = self.client.clone();
        let class_name = class_name.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.get_objects(&class_name).await },
            delegate,
        )
    }

    /// Fetch records matching filters, sort order and paging.
    pub fn get_objects_extended(
        &self,
        class_name: &str,
        request: &ExtendedRequest,
        delegate: impl Delegate<PagedObjects>,
    ) -> Cancelable {
        let client = self.client.clone();
        let class_name = class_name.to_string();
        let request = request.clone();
        callback::spawn(
            &self.runtime,
            async move { client.get_objects_extended(&class_name, &request).await },
            delegate,
        )
    }

    /// Count records matching the filters of `request`.
    pub fn count_objects(
        &self,
        class_name: &str,
        request: &ExtendedRequest,
        delegate: impl Delegate<u64>,
    ) -> Cancelable {
        let client = self.client.clone();
        let class_name = class_name.to_string();
        let request = request.clone();
        callback::spawn(
            &self.runtime,
            async move { client.count_objects(&class_name, &request).await },
            delegate,
        )
    }

    /// Create a record; the delegate gets it back with its id and timestamps.
    pub fn create_object(&self, object: &CustomObject, delegate: impl Delegate<CustomObject>) -> Cancelable {
        let client = self.client.clone();
        let object = object.clone();
        callback::spawn(
            &self.runtime,
            async move { client.create_object(&object).await },
            delegate,
        )
    }

    /// Create up to 100 records of one class in one request.
    pub fn create_objects(
        &self,
        class_name: &str,
        objects: &[CustomObject],
        delegate: impl Delegate<PagedObjects>,
    ) -> Cancelable {
        let client = self.client.clone();
        let objects = objects.to_vec();
        let class_name = class_name.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.create_objects(&class_name, &objects).await },
            delegate,
        )
    }

    /// Update the fields set on `object`.
    pub fn update_object(&self, object: &CustomObject, delegate: impl Delegate<CustomObject>) -> Cancelable {
        let client = self.client.clone();
        let object = object.clone();
        callback::spawn(
            &self.runtime,
            async move { client.update_object(&object).await },
            delegate,
        )
    }

    /// Update a record and apply special update operators together.
    pub fn update_object_with_operators(
        &self,
        object: &CustomObject,
        operators: &SpecialUpdateOperators,
        delegate: impl Delegate<CustomObject>,
    ) -> Cancelable {
        let client = self.client.clone();
        let object = object.clone();
        let operators = operators.clone();
        callback::spawn(
            &self.runtime,
            async move { client.update_object_with_operators(&object, &operators).await },
            delegate,
        )
    }

    /// Update up to 100 records of one class in one request.
    pub fn update_objects(
        &self,
        class_name: &str,
        objects: &[CustomObject],
        delegate: impl Delegate<PagedObjects>,
    ) -> Cancelable {
        let client = self.client.clone();
        let objects = objects.to_vec();
        let class_name = class_name.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.update_objects(&class_name, &objects).await },
            delegate,
        )
    }

    /// Delete one record.
    pub fn delete_object(&self, class_name: &str, id: &str, delegate: impl Delegate<()>) -> Cancelable {
        let client = self.client.clone();
        let id = id.to_string();
        let class_name = class_name.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.delete_object(&class_name, &id).await },
            delegate,
        )
    }

    /// Delete up to 100 records; the delegate learns which ids were deleted.
    pub fn delete_objects(
        &self,
        class_name: &str,
        ids: &[&str],
        delegate: impl Delegate<MultiDeleteResult>,
    ) -> Cancelable {
        let client = self.client.clone();
        let ids = owned_ids(ids);
        let class_name = class_name.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.delete_objects(&class_name, &borrowed_ids(&ids)).await },
            delegate,
        )
    }

    /// Fetch the access rules of a record.
    pub fn get_permissions(
        &self,
        class_name: &str,
        id: &str,
        delegate: impl Delegate<ObjectPermissions>,
    ) -> Cancelable {
        let client = self.client.clone();
        let class_name = class_name.to_string();
        let id = id.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.get_permissions(&class_name, &id).await },
            delegate,
        )
    }

    /// Upload a file into a file field, replacing the previous file.
    pub fn upload_file(
        &self,
        file: &CustomObjectFile,
        class_name: &str,
        id: &str,
        field_name: &str,
        delegate: impl Delegate<()>,
    ) -> Cancelable {
        let client = self.client.clone();
        let file = file.clone();
        let class_name = class_name.to_string();
        let id = id.to_string();
        let field_name = field_name.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.upload_file(&file, &class_name, &id, &field_name).await },
            delegate,
        )
    }

    /// Download the file stored in a file field.
    pub fn download_file(
        &self,
        class_name: &str,
        id: &str,
        field_name: &str,
        delegate: impl Delegate<FileDownload>,
    ) -> Cancelable {
        let client = self.client.clone();
        let class_name = class_name.to_string();
        let id = id.to_string();
        let field_name = field_name.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.download_file(&class_name, &id, &field_name).await },
            delegate,
        )
    }

    /// Delete the file stored in a file field.
    pub fn delete_file(
        &self,
        class_name: &str,
        id: &str,
        field_name: &str,
        delegate: impl Delegate<()>,
    ) -> Cancelable {
        let client = self.client.clone();
        let class_name = class_name.to_string();
        let id = id.to_string();
        let field_name = field_name.to_string();
        callback::spawn(
            &self.runtime,
            async move { client.delete_file(&class_name, &id, &field_name).await },
            delegate,
        )
    }
}
