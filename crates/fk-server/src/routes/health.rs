use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Fit Kro API is running" }))
}

/// Accounts are created by the client against the auth service.
pub async fn signup_deprecated() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Server-side signup is deprecated. Please use client-side signup.",
            "redirectTo": "client-side",
        })),
    )
}
