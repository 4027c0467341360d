#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use khronos_concierge::{
    error::ProviderError,
    services::provider::{ModelChat, ModelProvider, SessionConfig},
};

#[derive(Clone, Debug)]
pub enum Scripted {
    Text(String),
    Empty,
    Fail,
    /// Echo the input after a pause.
    SlowEcho(Duration),
}

/// Provider double that counts chats started and messages sent.
#[derive(Default)]
pub struct MockProvider {
    pub chats_started: AtomicUsize,
    pub messages_sent: Arc<AtomicUsize>,
    pub last_api_key: Mutex<Option<String>>,
    pub last_config: Mutex<Option<SessionConfig>>,
    script: Arc<Mutex<VecDeque<Scripted>>>,
}

impl MockProvider {
    pub fn scripted(replies: impl IntoIterator<Item = Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Arc::new(Mutex::new(replies.into_iter().collect())),
            ..Default::default()
        })
    }

    pub fn chats(&self) -> usize {
        self.chats_started.load(Ordering::SeqCst)
    }

    pub fn sends(&self) -> usize {
        self.messages_sent.load(Ordering::SeqCst)
    }
}

impl ModelProvider for MockProvider {
    fn start_chat(&self, api_key: &str, config: &SessionConfig) -> Box<dyn ModelChat> {
        self.chats_started.fetch_add(1, Ordering::SeqCst);
        *self.last_api_key.lock().unwrap() = Some(api_key.to_string());
        *self.last_config.lock().unwrap() = Some(config.clone());
        Box::new(MockChat { sent: self.messages_sent.clone(), script: self.script.clone() })
    }
}

struct MockChat {
    sent: Arc<AtomicUsize>,
    script: Arc<Mutex<VecDeque<Scripted>>>,
}

#[async_trait]
impl ModelChat for MockChat {
    async fn send_message(&mut self, text: &str) -> Result<Option<String>, ProviderError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Text(reply)) => Ok(Some(reply)),
            Some(Scripted::Empty) => Ok(None),
            Some(Scripted::Fail) => {
                Err(ProviderError::Status { status: 503, body: "unavailable".into() })
            }
            Some(Scripted::SlowEcho(pause)) => {
                tokio::time::sleep(pause).await;
                Ok(Some(format!("echo: {text}")))
            }
            None => Ok(Some(format!("echo: {text}"))),
        }
    }
}
