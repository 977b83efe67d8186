use std::time::Duration;

use crate::types::{FailureKind, TransportError};

pub const UPLOAD_PATH: &str = "/uploadimages";
pub const HEALTH_PATH: &str = "/health";
pub const CLASSIFY_PATH: &str = "/process-last-image";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin every flow talks to, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    /// Resolves a path or URL against the configured origin. Absolute URLs
    /// pass through untouched.
    pub fn resolve(&self, path_or_url: &str) -> Result<reqwest::Url, TransportError> {
        let base = reqwest::Url::parse(&self.base_url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        base.join(path_or_url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    /// Websocket rendition of the origin: same host and port, `ws`/`wss`
    /// scheme.
    pub fn channel_url(&self) -> Result<String, TransportError> {
        let base = reqwest::Url::parse(&self.base_url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let scheme = if base.scheme() == "https" { "wss" } else { "ws" };
        let host = base
            .host_str()
            .ok_or_else(|| TransportError::new(FailureKind::InvalidUrl, "base url has no host"))?;
        Ok(match base.port() {
            Some(port) => format!("{scheme}://{host}:{port}/"),
            None => format!("{scheme}://{host}/"),
        })
    }
}

pub(crate) fn build_client(settings: &ClientSettings) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))
}

pub(crate) fn check_status(response: &reqwest::Response) -> Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(TransportError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(FailureKind::InvalidBody, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
