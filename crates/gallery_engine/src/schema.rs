//! Typed response bodies for the three HTTP endpoints.
//!
//! Decoding goes through serde so a malformed body fails loudly instead of
//! falling through as missing fields.

use serde::Deserialize;

/// Body of a successful `/uploadimages` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    /// An absent key decodes as an empty list; both render identically
    /// (placeholder cleared, zero cells, one diagnostic).
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Body of a successful `/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of a successful `/process-last-image` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifyResponse {
    pub classification: String,
}
