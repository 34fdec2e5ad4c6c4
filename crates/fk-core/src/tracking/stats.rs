use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FoodLog, WorkoutLog};

/// Dashboard totals for a single UTC day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub steps: u32,
    pub workout_completed: bool,
}

impl DailyStats {
    pub fn for_day(day: NaiveDate, food: &[FoodLog], workouts: &[WorkoutLog], steps: u32) -> Self {
        let calories_consumed = food
            .iter()
            .filter(|log| log.on_day(day))
            .map(|log| log.calories)
            .sum();

        let todays_workouts: Vec<&WorkoutLog> =
            workouts.iter().filter(|log| log.on_day(day)).collect();

        Self {
            calories_consumed,
            calories_burned: todays_workouts.iter().map(|log| log.calories).sum(),
            steps,
            workout_completed: !todays_workouts.is_empty(),
        }
    }
}
