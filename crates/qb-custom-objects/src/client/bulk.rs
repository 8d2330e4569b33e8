use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::object::CustomObject;
use crate::results::{MultiDeleteEnvelope, MultiDeleteResult, PagedEnvelope, PagedObjects};
use crate::validate;

/// Wrap record bodies as `{"record": {"1": {..}, "2": {..}}}`, numbered in
/// input order.
fn multi_body(objects: &[CustomObject], include_id: bool) -> Value {
    let records: Map<String, Value> = objects
        .iter()
        .enumerate()
        .map(|(index, object)| {
            (
                (index + 1).to_string(),
                Value::Object(object.to_body(include_id)),
            )
        })
        .collect();

    let mut body = Map::new();
    body.insert("record".to_string(), Value::Object(records));
    Value::Object(body)
}

impl super::CustomObjectsClient {
    fn multi_path(class_name: &str) -> String {
        format!("data/{}/multi.json", class_name)
    }

    /// Create several records of one class in a single request (up to 100).
    ///
    /// Records whose `class_name` is set must name `class_name`.
    #[instrument(skip(self, objects), fields(count = objects.len()))]
    pub async fn create_objects(&self, class_name: &str, objects: &[CustomObject]) -> Result<PagedObjects> {
        validate::class_name(class_name)?;
        validate::batch_size(objects.len())?;
        for object in objects {
            validate::belongs_to(object, class_name)?;
            validate::fields(object)?;
        }

        let request = self
            .client
            .post(&Self::multi_path(class_name))
            .json_value(multi_body(objects, false));
        let envelope: PagedEnvelope = self.client.execute_json(request).await?;
        Ok(envelope.into_paged(class_name))
    }

    /// Update several records of one class in a single request (up to 100).
    ///
    /// Every record needs an id. Ids the backend could not find are reported
    /// in [`PagedObjects::not_found_ids`].
    #[instrument(skip(self, objects), fields(count = objects.len()))]
    pub async fn update_objects(&self, class_name: &str, objects: &[CustomObject]) -> Result<PagedObjects> {
        validate::class_name(class_name)?;
        validate::batch_size(objects.len())?;
        for object in objects {
            validate::belongs_to(object, class_name)?;
            validate::existing_id(object)?;
            validate::fields(object)?;
        }

        let request = self
            .client
            .put(&Self::multi_path(class_name))
            .json_value(multi_body(objects, true));
        let envelope: PagedEnvelope = self.client.execute_json(request).await?;
        let page = envelope.into_paged(class_name);
        if !page.not_found_ids.is_empty() {
            debug!(not_found = page.not_found_ids.len(), "Some records were not updated");
        }
        Ok(page)
    }

    /// Delete several records in a single request (up to 100).
    #[instrument(skip(self), fields(count = ids.len()))]
    pub async fn delete_objects(&self, class_name: &str, ids: &[&str]) -> Result<MultiDeleteResult> {
        validate::class_name(class_name)?;
        validate::object_ids(ids)?;

        let path = super::data_path(class_name, ids)?;
        let response = self.client.execute(self.client.delete(&path)).await?;
        let body = response.bytes().await?;

        // A single-id delete answers with an empty body.
        if body.iter().all(u8::is_ascii_whitespace) {
            if ids.len() != 1 {
                return Err(Error::new(ErrorKind::Other(format!(
                    "Empty response to a delete of {} records",
                    ids.len()
                ))));
            }
            return Ok(MultiDeleteResult {
                deleted_ids: ids.iter().map(|id| id.to_string()).collect(),
                ..Default::default()
            });
        }

        let envelope: MultiDeleteEnvelope = serde_json::from_slice(&body)?;
        Ok(envelope.into())
    }
}
