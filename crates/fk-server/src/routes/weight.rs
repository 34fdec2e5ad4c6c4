use axum::{extract::State, Json};
use serde_json::{json, Value};

use fk_app::usecases::tracking::NewWeightLog;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

pub async fn log(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewWeightLog>,
) -> ApiResult<Json<Value>> {
    let log = state
        .weight
        .log(&user, body)
        .await
        .map_err(ApiError::internal("log weight"))?;
    Ok(Json(json!({ "success": true, "log": log })))
}

pub async fn history(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Value>> {
    let logs = state
        .weight
        .history(&user)
        .await
        .map_err(ApiError::internal("get weight history"))?;
    Ok(Json(json!({ "logs": logs })))
}
