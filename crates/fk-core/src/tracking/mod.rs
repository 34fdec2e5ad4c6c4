//! Tracking domain: workout, food, weight and coach records kept in the KV store.

mod catalog;
mod coach;
pub mod keys;
mod logs;
mod nutrition;
mod stats;

pub use catalog::{Exercise, Workout, ALL_CATEGORIES};
pub use coach::{ChatMessage, CoachTopic, Sender};
pub use keys::LogKind;
pub use logs::{FoodLog, WeightLog, WorkoutLog};
pub use nutrition::NutritionEstimate;
pub use stats::DailyStats;
