use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    message: String,
}

pub async fn chat(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ChatRequest>,
) -> ApiResult<Json<Value>> {
    if body.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    let reply = state
        .coach
        .send(&user, &body.message)
        .await
        .map_err(ApiError::internal("process message"))?;
    Ok(Json(json!({
        "success": true,
        "response": reply.response,
        "messages": reply.messages,
    })))
}

pub async fn history(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Value>> {
    let messages = state
        .coach
        .history(&user)
        .await
        .map_err(ApiError::internal("get chat history"))?;
    Ok(Json(json!({ "messages": messages })))
}
