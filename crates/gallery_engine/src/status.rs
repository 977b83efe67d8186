use crate::http::{build_client, check_status, map_reqwest_error, ClientSettings, HEALTH_PATH};
use crate::schema::HealthResponse;
use crate::types::TransportError;

#[async_trait::async_trait]
pub trait StatusProbe: Send + Sync {
    /// One GET against the health endpoint, returning the status string.
    async fn check(&self) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStatusProbe {
    settings: ClientSettings,
}

impl ReqwestStatusProbe {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl StatusProbe for ReqwestStatusProbe {
    async fn check(&self) -> Result<String, TransportError> {
        let url = self.settings.resolve(HEALTH_PATH)?;
        let client = build_client(&self.settings)?;

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;
        check_status(&response)?;

        let body: HealthResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(body.status)
    }
}
