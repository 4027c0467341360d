mod common;

use std::{sync::Arc, time::Duration};

use common::{MockProvider, Scripted};
use khronos_concierge::{
    error::AppError,
    message::{ChatMessage, Role},
    persona::GREETING,
    services::{
        chat_desk::ChatDesk,
        chat_session::{ChatSessionManager, OFFLINE_REPLY, SIGNAL_LOST_REPLY},
        provider::SessionConfig,
        transcript::Transcript,
    },
};

fn desk(api_key: Option<&str>, provider: Arc<MockProvider>) -> ChatDesk {
    let config = SessionConfig {
        model: "gemini-2.5-flash".to_string(),
        system_instruction: "test persona".to_string(),
    };
    let session = ChatSessionManager::new(api_key.map(str::to_string), provider, config);
    ChatDesk::new(Arc::new(session), Transcript::new())
}

#[tokio::test]
async fn turn_appends_user_then_reply() {
    let provider = MockProvider::scripted([Scripted::Text("¡Vamos!".into())]);
    let desk = desk(Some("key"), provider);

    let reply = desk.handle_turn("  quiero entrenar  ").await.unwrap();
    assert_eq!(reply, ChatMessage::model("¡Vamos!"));

    let history = desk.transcript().history().await;
    assert_eq!(
        history,
        vec![
            ChatMessage::model(GREETING),
            ChatMessage::user("quiero entrenar"),
            ChatMessage::model("¡Vamos!"),
        ]
    );
}

#[tokio::test]
async fn blank_input_is_rejected_and_not_sent() {
    let provider = MockProvider::scripted([]);
    let desk = desk(Some("key"), provider.clone());

    let err = desk.handle_turn("   ").await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(desk.transcript().len().await, 1);
    assert_eq!(provider.sends(), 0);
    assert!(!desk.session().is_active());
}

#[tokio::test]
async fn fallbacks_are_flagged_as_errors() {
    let provider = MockProvider::scripted([Scripted::Fail]);
    let desk = desk(Some("key"), provider);

    let reply = desk.handle_turn("hola").await.unwrap();
    assert_eq!(reply.text, SIGNAL_LOST_REPLY);
    assert!(reply.is_error);

    let offline = desk_offline().handle_turn("hola").await.unwrap();
    assert_eq!(offline.text, OFFLINE_REPLY);
    assert!(offline.is_error);
}

fn desk_offline() -> ChatDesk {
    desk(None, MockProvider::scripted([]))
}

#[tokio::test]
async fn concurrent_turns_never_interleave() {
    let provider = MockProvider::scripted(
        (0..6).map(|i| Scripted::SlowEcho(Duration::from_millis(if i % 2 == 0 { 15 } else { 1 }))),
    );
    let desk = desk(Some("key"), provider);

    let mut handles = Vec::new();
    for i in 0..6 {
        let desk = desk.clone();
        handles.push(tokio::spawn(async move { desk.handle_turn(&format!("turno {i}")).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let history = desk.transcript().history().await;
    assert_eq!(history.len(), 1 + 6 * 2);
    for pair in history[1..].chunks(2) {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[1].role, Role::Model);
        assert_eq!(pair[1].text, format!("echo: {}", pair[0].text));
    }
}

#[tokio::test]
async fn dropped_turn_still_records_its_reply() {
    let provider = MockProvider::scripted([
        Scripted::SlowEcho(Duration::from_millis(200)),
        Scripted::Text("ok".into()),
    ]);
    let desk = desk(Some("key"), provider);

    let abandoned =
        tokio::time::timeout(Duration::from_millis(20), desk.handle_turn("dropped")).await;
    assert!(abandoned.is_err());

    let reply = desk.handle_turn("next").await.unwrap();
    assert_eq!(reply, ChatMessage::model("ok"));

    let history = desk.transcript().history().await;
    assert_eq!(
        history,
        vec![
            ChatMessage::model(GREETING),
            ChatMessage::user("dropped"),
            ChatMessage::model("echo: dropped"),
            ChatMessage::user("next"),
            ChatMessage::model("ok"),
        ]
    );
}
