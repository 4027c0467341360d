use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::{ChatMessage, ChatRequest, ChatResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let reply = state.desk.handle_turn(&payload.message).await?;

    Ok(Json(ChatResponse { reply: reply.text, is_error: reply.is_error }))
}

pub async fn history_handler(State(state): State<SharedState>) -> Json<Vec<ChatMessage>> {
    Json(state.desk.transcript().history().await)
}
