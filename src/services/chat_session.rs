// src/services/chat_session.rs
use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::provider::{ModelChat, ModelProvider, SessionConfig};
use crate::error::FailureKind;

pub const OFFLINE_REPLY: &str = "Systems offline. (Missing API Key)";
pub const INTERRUPTED_REPLY: &str = "Transmission interrupted.";
pub const SIGNAL_LOST_REPLY: &str = "Signal lost. Try again later.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    Answered,
    Offline,
    Interrupted,
    SignalLost,
}

impl ReplyOutcome {
    pub fn is_fallback(self) -> bool {
        self != ReplyOutcome::Answered
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub outcome: ReplyOutcome,
}

impl Reply {
    fn fallback(kind: FailureKind) -> Self {
        let (outcome, text) = match kind {
            FailureKind::MissingCredential => (ReplyOutcome::Offline, OFFLINE_REPLY),
            FailureKind::EmptyResponse => (ReplyOutcome::Interrupted, INTERRUPTED_REPLY),
            FailureKind::Transport => (ReplyOutcome::SignalLost, SIGNAL_LOST_REPLY),
        };
        warn!(kind = kind.as_str(), "assistant replied with fallback");
        Self { text: text.to_string(), outcome }
    }
}

/// Owns the one conversation the assistant holds with the model.
///
/// The session is opened on the first send that has a credential and is kept
/// for the lifetime of the manager, whatever happens to later sends. Sends are
/// serialized: the lock is held across the provider round-trip.
pub struct ChatSessionManager {
    api_key: Option<String>,
    provider: Arc<dyn ModelProvider>,
    config: SessionConfig,
    // `None` until the first send with a credential.
    session: Mutex<Option<Box<dyn ModelChat>>>,
    // Readable without waiting on an in-flight send.
    active: AtomicBool,
}

impl Debug for ChatSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSessionManager")
            .field("online", &self.api_key.is_some())
            .field("model", &self.config.model)
            .finish()
    }
}

impl ChatSessionManager {
    pub fn new(
        api_key: Option<String>,
        provider: Arc<dyn ModelProvider>,
        config: SessionConfig,
    ) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        Self {
            api_key,
            provider,
            config,
            session: Mutex::new(None),
            active: AtomicBool::new(false),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Send `text` and get back something to show. Never fails.
    pub async fn send_message(&self, text: &str) -> String {
        self.send(text).await.text
    }

    pub async fn send(&self, text: &str) -> Reply {
        let Some(api_key) = self.api_key.as_deref() else {
            return Reply::fallback(FailureKind::MissingCredential);
        };

        let mut session = self.session.lock().await;
        let chat = session.get_or_insert_with(|| {
            info!(model = %self.config.model, "opening chat session");
            self.provider.start_chat(api_key, &self.config)
        });
        self.active.store(true, Ordering::Release);

        match chat.send_message(text).await {
            Ok(Some(reply)) => Reply { text: reply, outcome: ReplyOutcome::Answered },
            Ok(None) => Reply::fallback(FailureKind::EmptyResponse),
            Err(err) => {
                error!(error = %err, "model call failed");
                Reply::fallback(FailureKind::Transport)
            }
        }
    }
}
