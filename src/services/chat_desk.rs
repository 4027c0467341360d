// src/services/chat_desk.rs
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error};

use super::{chat_session::ChatSessionManager, transcript::Transcript};
use crate::{error::AppError, message::ChatMessage};

/// Runs chat turns one at a time against a shared transcript.
#[derive(Clone, Debug)]
pub struct ChatDesk {
    session: Arc<ChatSessionManager>,
    transcript: Transcript,
    turn: Arc<Mutex<()>>,
}

impl ChatDesk {
    pub fn new(session: Arc<ChatSessionManager>, transcript: Transcript) -> Self {
        Self { session, transcript, turn: Arc::new(Mutex::new(())) }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn session(&self) -> &ChatSessionManager {
        &self.session
    }

    /// Record the user's text, ask the model and record its answer.
    ///
    /// The turn runs on its own task, so it completes even if the caller is
    /// dropped. With the turn lock spanning both appends, a user message is
    /// always followed by its own reply in the transcript.
    pub async fn handle_turn(&self, text: &str) -> Result<ChatMessage, AppError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::BadRequest("Message cannot be empty".to_string()));
        }

        let desk = self.clone();
        let text = trimmed.to_string();
        tokio::spawn(async move { desk.run_turn(text).await }).await.map_err(|err| {
            error!(error = %err, "chat turn task failed");
            AppError::Internal(err.to_string())
        })
    }

    async fn run_turn(&self, text: String) -> ChatMessage {
        let _turn = self.turn.lock().await;
        let position = self.transcript.append(ChatMessage::user(text.as_str())).await;
        debug!(position, "user message recorded");

        let reply = self.session.send(&text).await;
        let message = if reply.outcome.is_fallback() {
            ChatMessage::model_error(reply.text)
        } else {
            ChatMessage::model(reply.text)
        };
        self.transcript.append(message.clone()).await;
        message
    }
}
