use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fk_app::ApiDeps;
use fk_core::ports::{ActivityPort, ClockPort, SessionError, TokenVerifierPort};
use fk_core::AuthUser;
use fk_infra::{CannedSuggestionProvider, InMemoryKvStore, JsonWorkoutCatalog};
use fk_server::{router, ApiState};

const CATALOG: &str = r#"[
    {"id": "1", "name": "Full Body Strength", "category": "Home", "duration": 30,
     "difficulty": "Beginner", "calories": 250, "exerciseCount": 1,
     "exercises": [{"name": "Squats", "reps": 20, "sets": 3, "tips": "Push through your heels"}]},
    {"id": "2", "name": "HIIT Cardio", "category": "Gym", "duration": 20,
     "difficulty": "Advanced", "calories": 300, "exerciseCount": 0}
]"#;

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = app("");

    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "message": "Fit Kro API is running" }));
}

#[tokio::test]
async fn test_missing_or_unknown_token_is_unauthorized() {
    let app = app("");

    let (status, body) = send(&app, "GET", "/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let (status, _) = send(&app, "GET", "/stats", Some("stolen"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_lifecycle() {
    let app = app("");

    let (status, body) = send(&app, "GET", "/profile", Some("good"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Profile not found");

    let (status, body) = send(
        &app,
        "POST",
        "/profile",
        Some("good"),
        Some(json!({ "name": "Kim", "age": 25, "weight": 70 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["profile"]["completed"], true);

    let (_, body) = send(
        &app,
        "PUT",
        "/profile",
        Some("good"),
        Some(json!({ "goal": "gain" })),
    )
    .await;
    assert_eq!(body["profile"]["name"], "Kim");
    assert_eq!(body["profile"]["goal"], "gain");

    let (status, body) = send(&app, "GET", "/profile", Some("good"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["userId"], "user-1");
}

#[tokio::test]
async fn test_workout_catalog_filters_by_category() {
    let app = app("");

    let (_, all) = send(&app, "GET", "/workouts?category=All", None, None).await;
    assert_eq!(all["workouts"].as_array().unwrap().len(), 2);

    let (_, gym) = send(&app, "GET", "/workouts?category=Gym", None, None).await;
    let gym = gym["workouts"].as_array().unwrap();
    assert_eq!(gym.len(), 1);
    assert_eq!(gym[0]["name"], "HIIT Cardio");
}

#[tokio::test]
async fn test_logged_workout_shows_in_stats() {
    let app = app("");

    let (status, body) = send(
        &app,
        "POST",
        "/workouts/log",
        Some("good"),
        Some(json!({ "workoutId": "1", "workoutName": "Full Body Strength", "duration": 30, "calories": 250 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["log"]["workoutName"], "Full Body Strength");

    let (_, body) = send(&app, "GET", "/stats", Some("good"), None).await;
    assert_eq!(body["stats"]["caloriesBurned"], 250.0);
    assert_eq!(body["stats"]["steps"], 5000);
    assert_eq!(body["stats"]["workoutCompleted"], true);
}

#[tokio::test]
async fn test_food_history_with_bad_date_is_empty() {
    let app = app("");
    send(
        &app,
        "POST",
        "/food/log",
        Some("good"),
        Some(json!({ "foodName": "Oats", "calories": 300, "mealType": "breakfast" })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/food/history", Some("good"), None).await;
    assert_eq!(body["logs"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/food/history?date=yesterday", Some("good"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logs"], json!([]));
}

#[tokio::test]
async fn test_food_analyze_returns_estimate() {
    let app = app("");

    let (status, body) = send(
        &app,
        "POST",
        "/food/analyze",
        Some("good"),
        Some(json!({ "image": "data:image/jpeg;base64,AAAA" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["analysis"]["calories"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_coach_chat_and_history() {
    let app = app("");

    let (status, body) = send(
        &app,
        "POST",
        "/coach/chat",
        Some("good"),
        Some(json!({ "message": "I feel tired today" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"][0]["sender"], "user");
    assert_eq!(body["messages"][1]["sender"], "ai");
    assert_eq!(body["messages"][1]["content"], body["response"]);

    let (_, body) = send(&app, "GET", "/coach/history", Some("good"), None).await;
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);

    let (status, _) = send(
        &app,
        "POST",
        "/coach/chat",
        Some("good"),
        Some(json!({ "message": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weight_log_and_history() {
    let app = app("");

    for weight in [72.0, 71.2] {
        send(
            &app,
            "POST",
            "/weight/log",
            Some("good"),
            Some(json!({ "weight": weight })),
        )
        .await;
    }

    let (_, body) = send(&app, "GET", "/weight/history", Some("good"), None).await;
    assert_eq!(body["logs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_signup_is_deprecated() {
    let app = app("");

    let (status, body) = send(&app, "POST", "/signup", None, Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["redirectTo"], "client-side");
}

#[tokio::test]
async fn test_routes_mount_under_base_path() {
    let app = app("/make-server");

    let (status, _) = send(&app, "GET", "/make-server/health", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn app(base_path: &str) -> Router {
    let deps = ApiDeps {
        kv: Arc::new(InMemoryKvStore::new()),
        token_verifier: Arc::new(StaticTokens),
        workout_catalog: Arc::new(JsonWorkoutCatalog::from_json(CATALOG).unwrap()),
        suggestions: Arc::new(CannedSuggestionProvider::builtin()),
        activity: Arc::new(FixedSteps),
        clock: Arc::new(TickingClock::starting_now()),
    };
    router(ApiState::from_deps(&deps), base_path)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

struct StaticTokens;

#[async_trait]
impl TokenVerifierPort for StaticTokens {
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, SessionError> {
        Ok((access_token == "good").then(|| AuthUser {
            id: "user-1".to_string(),
            email: Some("kim@fitkro.app".to_string()),
            name: None,
        }))
    }
}

struct FixedSteps;

impl ActivityPort for FixedSteps {
    fn steps_today(&self, _user_id: &str) -> u32 {
        5000
    }
}

/// Real time, but every reading is one second later so log ids differ.
struct TickingClock {
    next_ms: AtomicI64,
}

impl TickingClock {
    fn starting_now() -> Self {
        Self {
            next_ms: AtomicI64::new(chrono::Utc::now().timestamp_millis()),
        }
    }
}

impl ClockPort for TickingClock {
    fn now_ms(&self) -> i64 {
        self.next_ms.fetch_add(1_000, Ordering::SeqCst)
    }
}
