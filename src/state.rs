// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::persona;
use crate::services::{
    chat_desk::ChatDesk,
    chat_session::ChatSessionManager,
    gemini::GeminiProvider,
    provider::{ModelProvider, SessionConfig},
    transcript::Transcript,
};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub desk: ChatDesk,
}

impl AppState {
    pub fn new(api_key: Option<String>, provider: Arc<dyn ModelProvider>, model: &str) -> Self {
        let config = SessionConfig {
            model: model.to_string(),
            system_instruction: persona::system_instruction(),
        };
        let session = Arc::new(ChatSessionManager::new(api_key, provider, config));
        Self { desk: ChatDesk::new(session, Transcript::new()) }
    }

    pub fn from_config(config: &Config) -> Self {
        let provider = Arc::new(GeminiProvider::new(config.base_url.clone()));
        Self::new(config.api_key.clone(), provider, &config.model)
    }
}
