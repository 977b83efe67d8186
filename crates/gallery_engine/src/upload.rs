use std::path::PathBuf;

use gallery_logging::gallery_debug;
use reqwest::multipart::{Form, Part};

use crate::http::{build_client, check_status, map_reqwest_error, ClientSettings, UPLOAD_PATH};
use crate::schema::UploadResponse;
use crate::types::{FailureKind, RequestId, TransportError};

/// Field name the upload endpoint expects, repeated once per file.
pub const UPLOAD_FIELD: &str = "files";

/// One file to post: its path on disk plus the name and media type declared
/// for its multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub name: String,
    pub media_type: String,
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Posts the whole batch as one multipart request and returns the image
    /// URLs the server responded with.
    async fn upload(
        &self,
        request_id: RequestId,
        files: &[UploadFile],
    ) -> Result<Vec<String>, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: ClientSettings,
}

impl ReqwestUploader {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    async fn build_form(&self, files: &[UploadFile]) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for file in files {
            let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
                TransportError::new(
                    FailureKind::Io,
                    format!("{}: {err}", file.path.display()),
                )
            })?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(&file.media_type)
                .map_err(|_| {
                    TransportError::new(
                        FailureKind::UnsupportedMediaType {
                            media_type: file.media_type.clone(),
                        },
                        "invalid media type",
                    )
                })?;
            form = form.part(UPLOAD_FIELD, part);
        }
        Ok(form)
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        request_id: RequestId,
        files: &[UploadFile],
    ) -> Result<Vec<String>, TransportError> {
        let url = self.settings.resolve(UPLOAD_PATH)?;
        let form = self.build_form(files).await?;
        let client = build_client(&self.settings)?;

        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(&response)?;

        let body: UploadResponse = response.json().await.map_err(map_reqwest_error)?;
        gallery_debug!(
            "upload request {} returned {} image urls",
            request_id,
            body.image_urls.len()
        );
        Ok(body.image_urls)
    }
}
