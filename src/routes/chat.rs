use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::advisor::{self, ChatContext};
use crate::models::ChatMessage;
use crate::ApiError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/chat", post(handler))
}

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
    /// Earlier turns of the conversation, oldest first.
    #[serde(default)]
    history: Vec<ChatMessage>,
    location: Option<String>,
    aqi: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ChatReply {
    reply: String,
}

async fn handler(
    State((model, _)): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    // ---
    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::InvalidRequest("Missing message".to_string()));
    }
    info!(
        "POST /api/chat history={} location={:?} aqi={:?}",
        request.history.len(),
        request.location,
        request.aqi
    );

    let ctx = ChatContext {
        location: request.location.clone(),
        aqi: request.aqi,
    };
    let reply = advisor::chat(model.as_ref(), &ctx, &request.history, message).await;
    Ok(Json(ChatReply { reply }))
}
