pub mod chat_desk;
pub mod chat_session;
pub mod gemini;
pub mod provider;
pub mod transcript;
