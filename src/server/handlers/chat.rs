use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::history::{ConversationTurn, TurnLog};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, oldest first. The caller owns the full history and
    /// sends it with every request; only the recent window reaches the
    /// prompt.
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, turns = req.history.len(), "Chat request");

    let history = TurnLog::from_turns(req.history);
    let reply = state.pipeline.respond(message, &history).await;

    tracing::info!(%request_id, chars = reply.len(), "Chat reply");
    Ok(Json(ChatResponse { reply }))
}
