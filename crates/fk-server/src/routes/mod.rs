//! API routes.

mod coach;
mod food;
mod health;
mod profile;
mod stats;
mod weight;
mod workouts;

use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::ApiState;

/// Build the API router, mounted under `base_path` when it is not empty.
pub fn router(state: ApiState, base_path: &str) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        .route("/signup", post(health::signup_deprecated))
        .route(
            "/profile",
            get(profile::get_profile)
                .post(profile::create_profile)
                .put(profile::update_profile),
        )
        .route("/workouts", get(workouts::list))
        .route("/workouts/log", post(workouts::log))
        .route("/workouts/history", get(workouts::history))
        .route("/food/log", post(food::log))
        .route("/food/history", get(food::history))
        .route("/food/analyze", post(food::analyze))
        .route("/stats", get(stats::today))
        .route("/weight/log", post(weight::log))
        .route("/weight/history", get(weight::history))
        .route("/coach/chat", post(coach::chat))
        .route("/coach/history", get(coach::history));

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 10));

    let base_path = base_path.trim_matches('/');
    let app = if base_path.is_empty() {
        routes
    } else {
        Router::new().nest(&format!("/{base_path}"), routes)
    };

    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
