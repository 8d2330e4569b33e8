use tracing::instrument;

use crate::error::Result;
use crate::results::ObjectPermissions;
use crate::validate;

impl super::CustomObjectsClient {
    /// Get the access rules of a record.
    #[instrument(skip(self))]
    pub async fn get_permissions(&self, class_name: &str, id: &str) -> Result<ObjectPermissions> {
        validate::class_name(class_name)?;
        validate::object_id(id)?;

        let path = super::data_path(class_name, &[id])?;
        let request = self.client.get(&path).query("permissions", "1");
        self.client.execute_json(request).await.map_err(Into::into)
    }
}
