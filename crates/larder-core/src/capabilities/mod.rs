//! External capabilities consumed by the resolver.
//!
//! The resolver only sees these traits. Concrete adapters talk to an OpenAI-compatible
//! chat-completions service and to Wikipedia; tests plug in in-process fakes.

mod chat;
mod image;
mod synthesizer;
#[cfg(test)]
pub(crate) mod test_support;

pub use chat::{ChatClient, ChatConfig};
pub use image::WikipediaImageLookup;
pub use synthesizer::ChatSynthesizer;

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Description text and illustrative image produced for an unknown ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedDescription {
    pub description: String,
    pub image: String,
}

/// Maps free text to a canonical-looking ingredient name.
#[async_trait]
pub trait NameNormalizer: Send + Sync {
    /// Fails with `NormalizationUnavailable` when the backing service errors.
    async fn normalize(&self, raw: &str) -> Result<String>;
}

/// Produces a short description and an image for an ingredient name.
#[async_trait]
pub trait DescriptionSynthesizer: Send + Sync {
    /// Fails with `SynthesisUnavailable` when the description cannot be produced.
    async fn synthesize(&self, name: &str) -> Result<SynthesizedDescription>;
}

/// Finds an image URL for an ingredient. Never fails.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    async fn image_for(&self, name: &str) -> String;
}

pub type DynNameNormalizer = Arc<dyn NameNormalizer>;
pub type DynDescriptionSynthesizer = Arc<dyn DescriptionSynthesizer>;
pub type DynImageLookup = Arc<dyn ImageLookup>;
