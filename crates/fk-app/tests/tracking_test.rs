use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use fk_app::usecases::tracking::{
    CoachChat, DailyStatsQuery, FoodRecords, NewFoodLog, NewWeightLog, NewWorkoutLog,
    ProfileRecords, WeightRecords, WorkoutRecords,
};
use fk_core::ports::{ActivityPort, ClockPort, KvStorePort};
use fk_core::tracking::{keys, LogKind, Sender};
use fk_core::AuthUser;
use fk_infra::{CannedSuggestionProvider, InMemoryKvStore, JsonWorkoutCatalog};

/// 2026-03-10T08:00:00Z
const START_MS: i64 = 1_773_129_600_000;

#[tokio::test]
async fn test_profile_create_then_update_merges() {
    let kv = Arc::new(InMemoryKvStore::new());
    let records = ProfileRecords::new(kv.clone(), StepClock::arc());
    let user = user();

    let created = records
        .create(&user, json!({ "name": "Kim", "weight": 70, "completed": false }))
        .await
        .unwrap();
    assert_eq!(created["completed"], true);
    assert_eq!(created["userId"], "user-1");
    assert!(created["createdAt"].is_string());

    let updated = records
        .update(&user, json!({ "goal": "lose", "userId": "someone-else" }))
        .await
        .unwrap();
    assert_eq!(updated["name"], "Kim");
    assert_eq!(updated["goal"], "lose");
    assert_eq!(updated["userId"], "user-1");

    let stored = records.get(&user).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_weight_log_updates_existing_profile_only() {
    let kv = Arc::new(InMemoryKvStore::new());
    let clock = StepClock::arc();
    let weights = WeightRecords::new(kv.clone(), clock.clone());
    let user = user();

    weights
        .log(&user, NewWeightLog { weight: 71.5, date: None })
        .await
        .unwrap();
    assert!(kv.get(&keys::profile(&user.id)).await.unwrap().is_none());

    ProfileRecords::new(kv.clone(), clock.clone())
        .create(&user, json!({ "weight": 71.5 }))
        .await
        .unwrap();
    weights
        .log(&user, NewWeightLog { weight: 70.0, date: None })
        .await
        .unwrap();

    let profile = kv.get(&keys::profile(&user.id)).await.unwrap().unwrap();
    assert_eq!(profile["weight"], 70.0);

    let history = weights.history(&user).await.unwrap();
    let values: Vec<f64> = history.iter().map(|log| log.weight).collect();
    assert_eq!(values, vec![71.5, 70.0]);
}

#[tokio::test]
async fn test_workout_history_is_newest_first() {
    let kv = Arc::new(InMemoryKvStore::new());
    let catalog = Arc::new(JsonWorkoutCatalog::from_workouts(Vec::new()));
    let workouts = WorkoutRecords::new(kv, catalog, StepClock::arc());
    let user = user();

    for name in ["Morning Run", "Evening Yoga"] {
        workouts
            .log(
                &user,
                NewWorkoutLog {
                    workout_id: "1".to_string(),
                    workout_name: name.to_string(),
                    duration: 30.0,
                    calories: 200.0,
                    completed_at: None,
                },
            )
            .await
            .unwrap();
    }

    let names: Vec<String> = workouts
        .history(&user)
        .await
        .unwrap()
        .into_iter()
        .map(|log| log.workout_name)
        .collect();
    assert_eq!(names, vec!["Evening Yoga", "Morning Run"]);
}

#[tokio::test]
async fn test_food_history_filters_by_day() {
    let kv = Arc::new(InMemoryKvStore::new());
    let food = FoodRecords::new(
        kv,
        Arc::new(CannedSuggestionProvider::builtin()),
        StepClock::arc(),
    );
    let user = user();
    let today = Utc.timestamp_millis_opt(START_MS).unwrap();

    food.log(&user, meal("Oats", 300.0, today)).await.unwrap();
    food.log(&user, meal("Pasta", 600.0, today - Duration::days(1)))
        .await
        .unwrap();

    let all = food.history(&user, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].food_name, "Pasta");

    let todays = food.history(&user, Some(today.date_naive())).await.unwrap();
    assert_eq!(todays.len(), 1);
    assert_eq!(todays[0].food_name, "Oats");
}

#[tokio::test]
async fn test_daily_stats_sum_today_only() {
    let kv = Arc::new(InMemoryKvStore::new());
    let clock = StepClock::arc();
    let user = user();
    let today = Utc.timestamp_millis_opt(START_MS).unwrap();

    let food = FoodRecords::new(
        kv.clone(),
        Arc::new(CannedSuggestionProvider::builtin()),
        clock.clone(),
    );
    food.log(&user, meal("Oats", 300.0, today)).await.unwrap();
    food.log(&user, meal("Salad", 250.0, today)).await.unwrap();
    food.log(&user, meal("Pizza", 900.0, today - Duration::days(2)))
        .await
        .unwrap();

    let stats = DailyStatsQuery::new(kv.clone(), Arc::new(FixedSteps(4200)), clock)
        .execute(&user)
        .await
        .unwrap();

    assert_eq!(stats.calories_consumed, 550.0);
    assert_eq!(stats.calories_burned, 0.0);
    assert_eq!(stats.steps, 4200);
    assert!(!stats.workout_completed);
}

#[tokio::test]
async fn test_coach_stores_both_messages() {
    let kv = Arc::new(InMemoryKvStore::new());
    let coach = CoachChat::new(
        kv.clone(),
        Arc::new(CannedSuggestionProvider::builtin()),
        StepClock::arc(),
    );
    let user = user();

    let reply = coach.send(&user, "What should I eat today?").await.unwrap();
    let [question, answer] = &reply.messages;
    assert_eq!(question.sender, Sender::User);
    assert_eq!(answer.sender, Sender::Ai);
    assert_eq!(answer.content, reply.response);
    assert_eq!(
        answer.message_id.parse::<i64>().unwrap(),
        question.message_id.parse::<i64>().unwrap() + 1
    );

    let history = coach.history(&user).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "What should I eat today?");
}

#[tokio::test]
async fn test_malformed_records_are_skipped() {
    let kv = Arc::new(InMemoryKvStore::new());
    let user = user();
    kv.set(
        &keys::log(&user.id, LogKind::Weight, "broken"),
        &json!({ "weight": "heavy" }),
    )
    .await
    .unwrap();

    let weights = WeightRecords::new(kv, StepClock::arc());
    weights
        .log(&user, NewWeightLog { weight: 80.0, date: None })
        .await
        .unwrap();

    assert_eq!(weights.history(&user).await.unwrap().len(), 1);
}

fn user() -> AuthUser {
    AuthUser {
        id: "user-1".to_string(),
        email: Some("kim@fitkro.app".to_string()),
        name: None,
    }
}

fn meal(name: &str, calories: f64, at: chrono::DateTime<Utc>) -> NewFoodLog {
    NewFoodLog {
        food_name: name.to_string(),
        calories,
        protein: 10.0,
        carbs: 10.0,
        fats: 10.0,
        meal_type: "lunch".to_string(),
        logged_at: Some(at),
    }
}

/// Advances one minute per reading so log ids stay unique.
struct StepClock {
    next_ms: AtomicI64,
}

impl StepClock {
    fn arc() -> Arc<Self> {
        Arc::new(Self {
            next_ms: AtomicI64::new(START_MS),
        })
    }
}

impl ClockPort for StepClock {
    fn now_ms(&self) -> i64 {
        self.next_ms.fetch_add(60_000, Ordering::SeqCst)
    }
}

struct FixedSteps(u32);

impl ActivityPort for FixedSteps {
    fn steps_today(&self, _user_id: &str) -> u32 {
        self.0
    }
}
