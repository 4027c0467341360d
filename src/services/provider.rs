// src/services/provider.rs
use async_trait::async_trait;

use crate::error::ProviderError;

/// Fixed parameters a chat session is created with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub model: String,
    pub system_instruction: String,
}

/// Something that can open conversations with a hosted model.
pub trait ModelProvider: Send + Sync {
    /// Build a new conversation. No network traffic happens here.
    fn start_chat(&self, api_key: &str, config: &SessionConfig) -> Box<dyn ModelChat>;
}

/// An open conversation. Keeps whatever context the provider needs between turns.
#[async_trait]
pub trait ModelChat: Send {
    /// One round-trip. `Ok(None)` means the provider answered without usable text.
    async fn send_message(&mut self, text: &str) -> Result<Option<String>, ProviderError>;
}
