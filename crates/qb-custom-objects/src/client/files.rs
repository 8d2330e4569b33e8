use quickblox_client::FilePart;
use tracing::instrument;

use crate::error::Result;
use crate::file::{CustomObjectFile, FileDownload};
use crate::validate;

/// Multipart field carrying the file content.
const FILE_PART: &str = "file";
/// Parameter naming the file field of the record.
const FIELD_NAME_PARAM: &str = "field_name";

impl super::CustomObjectsClient {
    fn file_path(class_name: &str, id: &str, field_name: &str) -> Result<String> {
        validate::class_name(class_name)?;
        validate::object_id(id)?;
        validate::field_name(field_name)?;
        Ok(format!("data/{}/{}/file.json", class_name, id))
    }

    /// Upload a file into a file field of a record, replacing any previous file.
    #[instrument(skip(self, file), fields(file_name = %file.name, size = file.len()))]
    pub async fn upload_file(
        &self,
        file: &CustomObjectFile,
        class_name: &str,
        id: &str,
        field_name: &str,
    ) -> Result<()> {
        let path = Self::file_path(class_name, id, field_name)?;
        let part = FilePart {
            field: FILE_PART.to_string(),
            file_name: file.name.clone(),
            content_type: file.content_type.clone(),
            data: file.data.clone(),
        };
        let request = self.client.post(&path).multipart(
            vec![(FIELD_NAME_PARAM.to_string(), field_name.to_string())],
            part,
        );
        self.client.execute(request).await?;
        Ok(())
    }

    /// Download the file stored in a file field of a record.
    #[instrument(skip(self))]
    pub async fn download_file(&self, class_name: &str, id: &str, field_name: &str) -> Result<FileDownload> {
        let path = Self::file_path(class_name, id, field_name)?;
        let request = self.client.get(&path).query(FIELD_NAME_PARAM, field_name);
        let response = self.client.execute(request).await?;
        let content_type = response.content_type().map(str::to_string);
        let data = response.bytes().await?;
        Ok(FileDownload { content_type, data })
    }

    /// Delete the file stored in a file field of a record.
    #[instrument(skip(self))]
    pub async fn delete_file(&self, class_name: &str, id: &str, field_name: &str) -> Result<()> {
        let path = Self::file_path(class_name, id, field_name)?;
        let request = self.client.delete(&path).query(FIELD_NAME_PARAM, field_name);
        self.client.execute(request).await?;
        Ok(())
    }
}
