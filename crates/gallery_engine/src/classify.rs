use bytes::Bytes;
use gallery_logging::gallery_debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};

use crate::http::{build_client, check_status, map_reqwest_error, ClientSettings, CLASSIFY_PATH};
use crate::schema::ClassifyResponse;
use crate::types::{FailureKind, RequestId, TransportError};

/// Field name the classification endpoint expects.
pub const CLASSIFY_FIELD: &str = "image";
/// Filename declared for the re-uploaded image part.
pub const CLASSIFY_FILENAME: &str = "image.png";

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    /// Re-fetches the image at `source_url` and posts its bytes for
    /// classification, returning the label string.
    async fn classify(
        &self,
        request_id: RequestId,
        source_url: &str,
    ) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClassifier {
    settings: ClientSettings,
}

impl ReqwestClassifier {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    async fn fetch_image(
        &self,
        client: &reqwest::Client,
        source_url: &str,
    ) -> Result<(Bytes, Option<String>), TransportError> {
        let url = self.settings.resolve(source_url)?;
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;
        check_status(&response)?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok((bytes, content_type))
    }
}

#[async_trait::async_trait]
impl Classifier for ReqwestClassifier {
    async fn classify(
        &self,
        request_id: RequestId,
        source_url: &str,
    ) -> Result<String, TransportError> {
        let client = build_client(&self.settings)?;

        let (bytes, content_type) = self.fetch_image(&client, source_url).await?;
        gallery_debug!(
            "classify request {} re-fetched {} bytes from {}",
            request_id,
            bytes.len(),
            source_url
        );

        let mut part = Part::bytes(bytes.to_vec()).file_name(CLASSIFY_FILENAME);
        if let Some(media_type) = content_type {
            part = part.mime_str(&media_type).map_err(|_| {
                TransportError::new(
                    FailureKind::UnsupportedMediaType {
                        media_type: media_type.clone(),
                    },
                    "invalid media type",
                )
            })?;
        }
        let form = Form::new().part(CLASSIFY_FIELD, part);

        let response = client
            .post(self.settings.resolve(CLASSIFY_PATH)?)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(&response)?;

        let body: ClassifyResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(body.classification)
    }
}
