//! HTTP client shared by the capability adapters.
//!
//! Provides a wrapper around reqwest with:
//! - Configurable timeouts
//! - User-agent management
//! - JSON GET/POST helpers that turn non-success statuses into errors

use crate::config::{AppConfig, NetworkConfig};
use crate::{LarderError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Thin JSON-over-HTTP client.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_timeout(NetworkConfig::REQUEST_TIMEOUT)
    }

    /// Create a new HTTP client with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(AppConfig::USER_AGENT)
            .build()
            .map_err(|e| LarderError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        Ok(Self { client })
    }

    /// GET a URL and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LarderError::Network {
                message: format!("GET {} failed: {}", extract_domain(url), e),
                source: Some(e),
            })?;

        let response = Self::check_response_status(response, url).await?;
        Ok(response.json::<T>().await?)
    }

    /// POST a JSON body with an optional bearer token and decode the JSON reply.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| LarderError::Network {
            message: format!("POST {} failed: {}", extract_domain(url), e),
            source: Some(e),
        })?;

        let response = Self::check_response_status(response, url).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_response_status(response: Response, url: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("{} responded {}: {}", extract_domain(url), status, body);
        Err(LarderError::Network {
            message: format!(
                "{} returned HTTP {}: {}",
                extract_domain(url),
                status.as_u16(),
                truncate(&body, 200)
            ),
            source: None,
        })
    }
}

/// Extract domain from a URL.
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}…", cut)
    }
}
