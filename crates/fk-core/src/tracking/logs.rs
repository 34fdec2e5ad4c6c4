use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A completed workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub user_id: String,
    pub workout_id: String,
    pub workout_name: String,
    /// Minutes.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub calories: f64,
    pub completed_at: DateTime<Utc>,
    pub log_id: String,
}

impl WorkoutLog {
    pub fn on_day(&self, day: NaiveDate) -> bool {
        self.completed_at.date_naive() == day
    }
}

/// A logged meal or snack. Macros are grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLog {
    pub user_id: String,
    pub food_name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub meal_type: String,
    pub logged_at: DateTime<Utc>,
    pub log_id: String,
}

impl FoodLog {
    pub fn on_day(&self, day: NaiveDate) -> bool {
        self.logged_at.date_naive() == day
    }
}

/// A body weight measurement in kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightLog {
    pub user_id: String,
    pub weight: f64,
    pub date: DateTime<Utc>,
    pub log_id: String,
}
