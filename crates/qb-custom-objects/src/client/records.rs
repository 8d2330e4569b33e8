use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::Result;
use crate::object::CustomObject;
use crate::operators::SpecialUpdateOperators;
use crate::validate;

impl super::CustomObjectsClient {
    /// Create a record. The returned record carries the server-assigned id
    /// and timestamps.
    #[instrument(skip(self, object), fields(class_name = %object.class_name))]
    pub async fn create_object(&self, object: &CustomObject) -> Result<CustomObject> {
        validate::class_name(&object.class_name)?;
        validate::fields(object)?;

        let path = super::data_path(&object.class_name, &[])?;
        let request = self.client.post(&path).json_value(Value::Object(object.to_body(false)));
        let mut created: CustomObject = self.client.execute_json(request).await?;
        created.class_name.clone_from(&object.class_name);
        Ok(created)
    }

    /// Update a record. Only fields present on `object` are changed.
    #[instrument(skip(self, object), fields(class_name = %object.class_name, id = ?object.id))]
    pub async fn update_object(&self, object: &CustomObject) -> Result<CustomObject> {
        self.put_object(object, object.to_body(false)).await
    }

    /// Update a record and apply special update operators in the same request.
    #[instrument(skip(self, object, operators), fields(class_name = %object.class_name, id = ?object.id))]
    pub async fn update_object_with_operators(
        &self,
        object: &CustomObject,
        operators: &SpecialUpdateOperators,
    ) -> Result<CustomObject> {
        let mut body = object.to_body(false);
        operators.merge_into(&mut body)?;
        self.put_object(object, body).await
    }

    async fn put_object(&self, object: &CustomObject, body: Map<String, Value>) -> Result<CustomObject> {
        validate::class_name(&object.class_name)?;
        let id = validate::existing_id(object)?;
        validate::fields(object)?;

        let path = super::data_path(&object.class_name, &[id])?;
        let request = self.client.put(&path).json_value(Value::Object(body));
        let mut updated: CustomObject = self.client.execute_json(request).await?;
        updated.class_name.clone_from(&object.class_name);
        Ok(updated)
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete_object(&self, class_name: &str, id: &str) -> Result<()> {
        validate::class_name(class_name)?;
        validate::object_id(id)?;

        let path = super::data_path(class_name, &[id])?;
        self.client.execute(self.client.delete(&path)).await?;
        Ok(())
    }
}
