//! Description synthesis backed by the chat client and an image lookup.

use super::{ChatClient, DescriptionSynthesizer, DynImageLookup, SynthesizedDescription};
use crate::{LarderError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Writes the description with the chat service, then attaches an image.
pub struct ChatSynthesizer {
    chat: Arc<ChatClient>,
    images: DynImageLookup,
}

impl ChatSynthesizer {
    pub fn new(chat: Arc<ChatClient>, images: DynImageLookup) -> Self {
        Self { chat, images }
    }
}

#[async_trait]
impl DescriptionSynthesizer for ChatSynthesizer {
    async fn synthesize(&self, name: &str) -> Result<SynthesizedDescription> {
        let description = self
            .chat
            .describe(name)
            .await
            .map_err(|e| LarderError::SynthesisUnavailable {
                message: e.to_string(),
            })?;

        // Image lookup never fails; it degrades to the placeholder.
        let image = self.images.image_for(name).await;
        debug!("Synthesized description for '{}'", name);

        Ok(SynthesizedDescription { description, image })
    }
}
