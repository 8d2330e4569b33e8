use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};
use crate::extended_request::ExtendedRequest;
use crate::object::CustomObject;
use crate::results::{CountEnvelope, PagedEnvelope, PagedObjects};
use crate::validate;

impl super::CustomObjectsClient {
    /// Fetch one page of records of a class, optionally limited to `ids`.
    async fn fetch_page(
        &self,
        class_name: &str,
        ids: &[&str],
        params: Vec<(String, String)>,
    ) -> Result<PagedObjects> {
        let path = super::data_path(class_name, ids)?;
        let request = self.client.get(&path).query_pairs(params);
        let envelope: PagedEnvelope = self.client.execute_json(request).await?;
        Ok(envelope.into_paged(class_name))
    }

    /// Get a record by id.
    #[instrument(skip(self))]
    pub async fn get_object(&self, class_name: &str, id: &str) -> Result<CustomObject> {
        validate::class_name(class_name)?;
        validate::object_id(id)?;

        self.fetch_page(class_name, &[id], Vec::new())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::new(ErrorKind::NotFound(format!("{} record {}", class_name, id))))
    }

    /// Get several records by id (up to 100). Missing ids are left out of
    /// the page.
    #[instrument(skip(self))]
    pub async fn get_objects_by_ids(&self, class_name: &str, ids: &[&str]) -> Result<PagedObjects> {
        validate::class_name(class_name)?;
        validate::object_ids(ids)?;
        self.fetch_page(class_name, ids, Vec::new()).await
    }

    /// Get the first page of records of a class, using the backend's default
    /// page size.
    #[instrument(skip(self))]
    pub async fn get_objects(&self, class_name: &str) -> Result<PagedObjects> {
        validate::class_name(class_name)?;
        self.fetch_page(class_name, &[], Vec::new()).await
    }

    /// Get records matching an [`ExtendedRequest`].
    #[instrument(skip(self, request), fields(params = request.to_query_pairs().len()))]
    pub async fn get_objects_extended(
        &self,
        class_name: &str,
        request: &ExtendedRequest,
    ) -> Result<PagedObjects> {
        validate::class_name(class_name)?;
        self.fetch_page(class_name, &[], request.to_query_pairs()).await
    }

    /// Count records matching an [`ExtendedRequest`].
    #[instrument(skip(self, request))]
    pub async fn count_objects(&self, class_name: &str, request: &ExtendedRequest) -> Result<u64> {
        validate::class_name(class_name)?;
        let path = super::data_path(class_name, &[])?;
        let http_request = self
            .client
            .get(&path)
            .query_pairs(request.to_query_pairs())
            .query("count", "1");
        let envelope: CountEnvelope = self.client.execute_json(http_request).await?;
        Ok(envelope.items_count)
    }
}
