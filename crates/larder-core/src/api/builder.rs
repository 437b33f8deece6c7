//! Builder for configuring LarderApi initialization.

use std::path::PathBuf;
use std::sync::Arc;

use crate::capabilities::{
    ChatClient, ChatConfig, ChatSynthesizer, DynDescriptionSynthesizer, DynImageLookup,
    DynNameNormalizer, WikipediaImageLookup,
};
use crate::config::IndexConfig;
use crate::error::{LarderError, Result};
use crate::index::FuzzyIndex;
use crate::resolver::Resolver;
use crate::store::RecordStore;
use crate::LarderApi;
use tracing::info;

/// Builder for configuring LarderApi initialization.
///
/// # Example
///
/// ```rust,ignore
/// use larder_core::LarderApi;
///
/// let api = LarderApi::builder("./data/ingredients.json")
///     .auto_create(true)
///     .fuzzy_threshold(0.3)
///     .build()?;
/// ```
pub struct LarderApiBuilder {
    data_file: PathBuf,
    auto_create: bool,
    keep_backup: bool,
    fuzzy_threshold: f64,
    chat_config: Option<ChatConfig>,
    normalizer: Option<DynNameNormalizer>,
    synthesizer: Option<DynDescriptionSynthesizer>,
    image_lookup: Option<DynImageLookup>,
}

impl LarderApiBuilder {
    /// Create a new builder for the given ingredient file.
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            auto_create: false,
            keep_backup: false,
            fuzzy_threshold: IndexConfig::DEFAULT_THRESHOLD,
            chat_config: None,
            normalizer: None,
            synthesizer: None,
            image_lookup: None,
        }
    }

    /// Create the data file (and its directory) with an empty set if missing.
    ///
    /// Default: `false` (the file's directory must exist; a missing file reads as empty)
    pub fn auto_create(mut self, enable: bool) -> Self {
        self.auto_create = enable;
        self
    }

    /// Keep a `.bak` copy of the previous file on every rewrite.
    ///
    /// Default: `false`
    pub fn keep_backup(mut self, enable: bool) -> Self {
        self.keep_backup = enable;
        self
    }

    /// Maximum edits per query character accepted by the fuzzy index.
    ///
    /// Default: `0.4`. Values outside `0.0..=1.0` are clamped; NaN or infinity fails `build`.
    pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Settings for the chat-completions service. Defaults to `ChatConfig::from_env()`.
    pub fn chat_config(mut self, config: ChatConfig) -> Self {
        self.chat_config = Some(config);
        self
    }

    /// Replace the chat-backed name normalizer.
    pub fn normalizer(mut self, normalizer: DynNameNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Replace the chat-backed description synthesizer.
    pub fn synthesizer(mut self, synthesizer: DynDescriptionSynthesizer) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Replace the Wikipedia image lookup used by the default synthesizer.
    pub fn image_lookup(mut self, image_lookup: DynImageLookup) -> Self {
        self.image_lookup = Some(image_lookup);
        self
    }

    /// Build the LarderApi instance.
    ///
    /// The store is read once here; a corrupt file fails the build.
    pub fn build(self) -> Result<LarderApi> {
        if !self.fuzzy_threshold.is_finite() {
            return Err(LarderError::Config {
                message: format!(
                    "Fuzzy threshold must be a finite number, got {}",
                    self.fuzzy_threshold
                ),
            });
        }

        let parent = self
            .data_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from);

        if let Some(dir) = &parent {
            if !dir.exists() {
                if self.auto_create {
                    std::fs::create_dir_all(dir).map_err(|e| LarderError::Io {
                        message: format!("Failed to create data directory: {}", dir.display()),
                        path: Some(dir.clone()),
                        source: Some(e),
                    })?;
                } else {
                    return Err(LarderError::Config {
                        message: format!("Data directory does not exist: {}", dir.display()),
                    });
                }
            }
        }

        let store = Arc::new(RecordStore::new(&self.data_file).with_backup(self.keep_backup));
        if self.auto_create {
            store.ensure_exists()?;
        }

        let index = Arc::new(FuzzyIndex::new(self.fuzzy_threshold));
        let records = store.load_all()?;
        index.rebuild(&records);

        let (normalizer, synthesizer) = match (self.normalizer, self.synthesizer) {
            (Some(normalizer), Some(synthesizer)) => (normalizer, synthesizer),
            (normalizer, synthesizer) => {
                let chat = Arc::new(ChatClient::new(
                    self.chat_config.unwrap_or_else(ChatConfig::from_env),
                )?);
                if chat.config().api_key.is_none() {
                    tracing::warn!(
                        "No API key configured; queries without an exact match will fail"
                    );
                }
                let normalizer: DynNameNormalizer = match normalizer {
                    Some(normalizer) => normalizer,
                    None => chat.clone(),
                };
                let synthesizer: DynDescriptionSynthesizer = match synthesizer {
                    Some(synthesizer) => synthesizer,
                    None => {
                        let images: DynImageLookup = match self.image_lookup {
                            Some(images) => images,
                            None => Arc::new(WikipediaImageLookup::new()?),
                        };
                        Arc::new(ChatSynthesizer::new(chat, images))
                    }
                };
                (normalizer, synthesizer)
            }
        };

        info!(
            "Ingredient store {} loaded with {} record(s)",
            store.path().display(),
            records.len()
        );

        let resolver = Resolver::new(store.clone(), index.clone(), normalizer, synthesizer);
        Ok(LarderApi {
            store,
            index,
            resolver,
        })
    }
}
