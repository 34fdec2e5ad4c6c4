use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

pub async fn get_profile(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Value>> {
    let profile = state
        .profiles
        .get(&user)
        .await
        .map_err(ApiError::internal("get profile"))?
        .ok_or(ApiError::NotFound("Profile not found"))?;
    Ok(Json(json!({ "profile": profile })))
}

pub async fn create_profile(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let profile = state
        .profiles
        .create(&user, body)
        .await
        .map_err(ApiError::internal("create profile"))?;
    Ok(Json(json!({ "success": true, "profile": profile })))
}

pub async fn update_profile(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let profile = state
        .profiles
        .update(&user, body)
        .await
        .map_err(ApiError::internal("update profile"))?;
    Ok(Json(json!({ "success": true, "profile": profile })))
}
