//! OpenAI-compatible chat-completions adapter.
//!
//! Used twice per unknown ingredient at most: once to normalize the query into an
//! ingredient name, once to write a short culinary description.

use super::NameNormalizer;
use crate::config::LlmConfig;
use crate::network::HttpClient;
use crate::{LarderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Connection settings for the text-generation service.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: LlmConfig::DEFAULT_BASE_URL.to_string(),
            model: LlmConfig::DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl ChatConfig {
    /// Read settings from `GROQ_API_KEY`, `LARDER_LLM_BASE_URL` and `LARDER_LLM_MODEL`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            base_url: non_empty(LlmConfig::BASE_URL_ENV).unwrap_or(defaults.base_url),
            model: non_empty(LlmConfig::MODEL_ENV).unwrap_or(defaults.model),
            api_key: non_empty(LlmConfig::API_KEY_ENV),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Full URL of the completions endpoint.
    pub fn completions_url(&self) -> Result<String> {
        let base = url::Url::parse(&self.base_url).map_err(|e| LarderError::Config {
            message: format!("Invalid LLM base URL '{}': {}", self.base_url, e),
        })?;
        Ok(format!(
            "{}/chat/completions",
            base.as_str().trim_end_matches('/')
        ))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for the chat-completions endpoint.
pub struct ChatClient {
    http: HttpClient,
    config: ChatConfig,
    completions_url: String,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self> {
        Self::with_http(config, HttpClient::new()?)
    }

    pub fn with_http(config: ChatConfig, http: HttpClient) -> Result<Self> {
        let completions_url = config.completions_url()?;
        Ok(Self {
            http,
            config,
            completions_url,
        })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Write a 2-3 point culinary description of `name`, bullet-delimited.
    pub async fn describe(&self, name: &str) -> Result<String> {
        self.complete(describe_prompt(name), LlmConfig::DESCRIBE_TEMPERATURE)
            .await
    }

    async fn complete(&self, prompt: String, temperature: f32) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LarderError::Config {
                message: format!("{} is not set", LlmConfig::API_KEY_ENV),
            })?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature,
        };

        debug!("Requesting completion from {}", self.config.model);
        let response: ChatResponse = self
            .http
            .post_json(&self.completions_url, &request, Some(api_key))
            .await?;
        first_message(response)
    }
}

#[async_trait]
impl NameNormalizer for ChatClient {
    async fn normalize(&self, raw: &str) -> Result<String> {
        self.complete(normalize_prompt(raw), LlmConfig::NORMALIZE_TEMPERATURE)
            .await
            .map_err(|e| LarderError::NormalizationUnavailable {
                message: e.to_string(),
            })
    }
}

fn normalize_prompt(text: &str) -> String {
    format!(
        "Return ONLY the corrected ingredient name. No extra words.\n\n\
         Input: \"{}\"\nCorrected:",
        text
    )
}

fn describe_prompt(name: &str) -> String {
    format!(
        "Write a short 2-3 line description about \"{}\".\n\
         Return it as bullet points using the • character.\n\
         Do NOT mention health or medical claims.\n\
         Only describe culinary usage.",
        name
    )
}

/// Trimmed content of the first choice; an empty or missing message is malformed.
fn first_message(response: ChatResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(LarderError::Other(
            "Completion response contained no message".to_string(),
        ));
    }
    Ok(content)
}
