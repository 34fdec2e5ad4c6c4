use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use fk_app::usecases::tracking::NewWorkoutLog;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    category: Option<String>,
}

/// Public catalog, no token needed.
pub async fn list(
    State(state): State<ApiState>,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Json<Value>> {
    let workouts = state
        .workouts
        .list(query.category.as_deref())
        .map_err(ApiError::internal("get workouts"))?;
    Ok(Json(json!({ "workouts": workouts })))
}

pub async fn log(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewWorkoutLog>,
) -> ApiResult<Json<Value>> {
    let log = state
        .workouts
        .log(&user, body)
        .await
        .map_err(ApiError::internal("log workout"))?;
    Ok(Json(json!({ "success": true, "log": log })))
}

pub async fn history(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Value>> {
    let logs = state
        .workouts
        .history(&user)
        .await
        .map_err(ApiError::internal("get workout history"))?;
    Ok(Json(json!({ "logs": logs })))
}
