use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

pub async fn today(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Value>> {
    let stats = state
        .stats
        .execute(&user)
        .await
        .map_err(ApiError::internal("get stats"))?;
    Ok(Json(json!({ "stats": stats })))
}
