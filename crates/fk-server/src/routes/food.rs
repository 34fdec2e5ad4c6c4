use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use fk_app::usecases::tracking::NewFoodLog;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    image: Option<String>,
}

pub async fn log(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewFoodLog>,
) -> ApiResult<Json<Value>> {
    let log = state
        .food
        .log(&user, body)
        .await
        .map_err(ApiError::internal("log food"))?;
    Ok(Json(json!({ "success": true, "log": log })))
}

/// `?date=YYYY-MM-DD` limits results to that UTC day. A date that does not
/// parse matches nothing.
pub async fn history(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<Value>> {
    let day = match query.date.as_deref() {
        None | Some("") => None,
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(day) => Some(day),
            Err(_) => {
                debug!(date = raw, "unparseable date filter");
                return Ok(Json(json!({ "logs": [] })));
            }
        },
    };

    let logs = state
        .food
        .history(&user, day)
        .await
        .map_err(ApiError::internal("get food history"))?;
    Ok(Json(json!({ "logs": logs })))
}

pub async fn analyze(
    State(state): State<ApiState>,
    CurrentUser(_user): CurrentUser,
    body: Option<Json<AnalyzeRequest>>,
) -> ApiResult<Json<Value>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let analysis = state.food.analyze(request.image.as_deref().map(str::as_bytes));
    Ok(Json(json!({ "success": true, "analysis": analysis })))
}
