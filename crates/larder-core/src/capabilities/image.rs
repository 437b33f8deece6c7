//! Image lookup with a constant fallback.

use super::ImageLookup;
use crate::config::{ImageConfig, NetworkConfig};
use crate::network::HttpClient;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Looks up the page-summary thumbnail on Wikipedia, falling back to the placeholder.
pub struct WikipediaImageLookup {
    http: HttpClient,
    base_url: String,
}

impl WikipediaImageLookup {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_timeout(NetworkConfig::IMAGE_LOOKUP_TIMEOUT)?,
            base_url: ImageConfig::WIKIPEDIA_SUMMARY_BASE.to_string(),
        })
    }

    /// Point the lookup at a different summary endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn summary_url(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(name)
        )
    }

    async fn lookup(&self, name: &str) -> Result<Option<String>> {
        let summary: Value = self.http.get_json(&self.summary_url(name)).await?;
        Ok(thumbnail_source(&summary))
    }
}

#[async_trait]
impl ImageLookup for WikipediaImageLookup {
    async fn image_for(&self, name: &str) -> String {
        match self.lookup(name).await {
            Ok(Some(url)) => {
                debug!("Found image for '{}'", name);
                url
            }
            Ok(None) => {
                debug!("No thumbnail for '{}', using placeholder", name);
                ImageConfig::PLACEHOLDER_URL.to_string()
            }
            Err(e) => {
                warn!("Image lookup for '{}' failed, using placeholder: {}", name, e);
                ImageConfig::PLACEHOLDER_URL.to_string()
            }
        }
    }
}

/// `thumbnail.source` from a page-summary document, if present and non-empty.
fn thumbnail_source(summary: &Value) -> Option<String> {
    summary
        .get("thumbnail")
        .and_then(|t| t.get("source"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
