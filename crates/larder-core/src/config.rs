//! Centralized configuration for Larder.
//!
//! This module provides configuration constants for the fuzzy index, the text-generation
//! service, image lookup, networking, and on-disk paths.

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const USER_AGENT: &'static str = "Larder/0.1 (ingredient resolver)";
}

/// Fuzzy index tuning.
pub struct IndexConfig;

impl IndexConfig {
    /// Maximum edits per query character for an entry to count as a match (0.0 = exact).
    pub const DEFAULT_THRESHOLD: f64 = 0.4;
    /// Suggestions returned from a fuzzy search.
    pub const MAX_SUGGESTIONS: usize = 3;
}

/// Text-generation service defaults (OpenAI-compatible chat completions).
pub struct LlmConfig;

impl LlmConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.groq.com/openai/v1";
    pub const DEFAULT_MODEL: &'static str = "llama-3.1-8b-instant";
    pub const NORMALIZE_TEMPERATURE: f32 = 0.2;
    pub const DESCRIBE_TEMPERATURE: f32 = 0.4;

    // Environment variables read by `ChatConfig::from_env`
    pub const API_KEY_ENV: &'static str = "GROQ_API_KEY";
    pub const BASE_URL_ENV: &'static str = "LARDER_LLM_BASE_URL";
    pub const MODEL_ENV: &'static str = "LARDER_LLM_MODEL";
}

/// Image lookup configuration.
pub struct ImageConfig;

impl ImageConfig {
    pub const WIKIPEDIA_SUMMARY_BASE: &'static str =
        "https://en.wikipedia.org/api/rest_v1/page/summary";
    /// Returned whenever the primary lookup yields nothing usable.
    pub const PLACEHOLDER_URL: &'static str =
        "https://upload.wikimedia.org/wikipedia/commons/6/65/No-Image-Placeholder.svg";
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const IMAGE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Shared file and path configuration.
pub struct PathsConfig;

impl PathsConfig {
    pub const DATA_DIR_NAME: &'static str = "larder";
    pub const STORE_FILENAME: &'static str = "ingredients.json";
    pub const EXPORT_FILENAME: &'static str = "ingredient-search.txt";
}

/// Description formatting.
pub struct DescriptionConfig;

impl DescriptionConfig {
    /// Marker separating description points.
    pub const BULLET: char = '•';
}
