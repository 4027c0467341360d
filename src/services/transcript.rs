// src/services/transcript.rs
use std::{fmt::Debug, sync::Arc};

use tokio::sync::RwLock;

use crate::{message::ChatMessage, persona::GREETING};

/// Append-only chat history, opened with the greeting.
#[derive(Clone)]
pub struct Transcript {
    inner: Arc<RwLock<Vec<ChatMessage>>>,
}

impl Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript").finish_non_exhaustive()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(vec![ChatMessage::model(GREETING)])) }
    }

    // Push a message and return the new length.
    pub async fn append(&self, message: ChatMessage) -> usize {
        let mut guard = self.inner.write().await;
        guard.push(message);
        guard.len()
    }

    /// Copy of the history in append order.
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
