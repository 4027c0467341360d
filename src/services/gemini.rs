// src/services/gemini.rs
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{ModelChat, ModelProvider, SessionConfig};
use crate::error::ProviderError;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    thought: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: Some(text.to_string()), thought: false }],
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: &'a Content,
    contents: &'a [Content],
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Talks to the Generative Language REST API.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: Client::new(), base_url: base_url.into() }
    }
}

impl ModelProvider for GeminiProvider {
    fn start_chat(&self, api_key: &str, config: &SessionConfig) -> Box<dyn ModelChat> {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            config.model
        );
        Box::new(GeminiChat {
            client: self.client.clone(),
            endpoint,
            api_key: api_key.to_string(),
            system_instruction: Content::text(None, &config.system_instruction),
            history: Vec::new(),
        })
    }
}

/// The REST API is stateless, so the conversation is replayed on every turn.
pub struct GeminiChat {
    client: Client,
    endpoint: String,
    api_key: String,
    system_instruction: Content,
    history: Vec<Content>,
}

#[async_trait]
impl ModelChat for GeminiChat {
    async fn send_message(&mut self, text: &str) -> Result<Option<String>, ProviderError> {
        let mut contents = self.history.clone();
        contents.push(Content::text(Some("user"), text));

        let body = GenerateContentRequest {
            system_instruction: &self.system_instruction,
            contents: &contents,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status { status: status.as_u16(), body: raw });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|e| ProviderError::Decode(e.to_string()))?;

        let Some(reply) = parsed.text() else {
            return Ok(None);
        };

        contents.push(Content::text(Some("model"), &reply));
        self.history = contents;
        debug!(turns = self.history.len(), "gemini turn recorded");
        Ok(Some(reply))
    }
}
