use serde::{Deserialize, Serialize};

/// Estimated nutrition for a photographed dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    /// 0.0 to 1.0.
    pub confidence: f64,
}
