use crate::tracking::{CoachTopic, NutritionEstimate};

/// Stand-in for model inference: food recognition and coach replies.
pub trait SuggestionProviderPort: Send + Sync {
    /// Estimate nutrition for an uploaded meal photo.
    fn classify_food(&self, image: Option<&[u8]>) -> NutritionEstimate;

    /// Reply to a coach message already classified into `topic`.
    fn respond(&self, topic: CoachTopic, message: &str) -> String;
}
