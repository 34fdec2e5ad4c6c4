use serde::{Deserialize, Serialize};

/// Category filter value that matches every workout.
pub const ALL_CATEGORIES: &str = "All";

/// One exercise inside a workout. Either `reps` or `duration` (seconds) is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub sets: u32,
    #[serde(default)]
    pub tips: String,
}

/// Workout catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Minutes.
    pub duration: u32,
    pub difficulty: String,
    pub calories: u32,
    pub exercise_count: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Workout {
    /// `None` and `"All"` match everything; otherwise exact category match.
    pub fn matches_category(&self, category: Option<&str>) -> bool {
        match category {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => self.category == category,
        }
    }
}
