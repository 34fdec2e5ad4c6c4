//! Canned suggestions.
//!
//! Picks a random entry from fixed lists. Stands in for real food
//! recognition and a real coach model.

use std::collections::HashMap;

use rand::seq::IndexedRandom;

use fk_core::ports::SuggestionProviderPort;
use fk_core::tracking::CoachTopic;
use fk_core::NutritionEstimate;

fn estimate(name: &str, calories: f64, protein: f64, carbs: f64, fats: f64, confidence: f64) -> NutritionEstimate {
    NutritionEstimate {
        name: name.to_string(),
        calories,
        protein,
        carbs,
        fats,
        confidence,
    }
}

pub struct CannedSuggestionProvider {
    foods: Vec<NutritionEstimate>,
    replies: HashMap<CoachTopic, Vec<String>>,
}

impl CannedSuggestionProvider {
    pub fn new(foods: Vec<NutritionEstimate>, replies: HashMap<CoachTopic, Vec<String>>) -> Self {
        Self { foods, replies }
    }

    pub fn builtin() -> Self {
        let foods = vec![
            estimate("Grilled Chicken Breast", 165.0, 31.0, 0.0, 3.6, 0.92),
            estimate("Rice Bowl with Vegetables", 420.0, 12.0, 68.0, 10.0, 0.85),
            estimate("Salmon with Broccoli", 380.0, 35.0, 12.0, 20.0, 0.91),
            estimate("Greek Yogurt with Berries", 180.0, 15.0, 25.0, 2.0, 0.87),
        ];

        let replies = [
            (
                CoachTopic::Nutrition,
                vec![
                    "Build each meal around a lean protein, add whole grains, and fill half the plate with vegetables.",
                    "Prepping meals ahead of the week makes it much easier to hit your targets on busy days.",
                    "Drink water through the day. A glass before each meal also helps with portion control.",
                ],
            ),
            (
                CoachTopic::Training,
                vec![
                    "Mix three or four strength sessions with two cardio days, and keep at least one rest day.",
                    "Compound lifts like squats and rows work several muscle groups at once. Start with 3 sets of 8 to 12 reps.",
                    "Regular moderate sessions beat occasional hard ones. Start with three days a week and build up.",
                ],
            ),
            (
                CoachTopic::Weight,
                vec![
                    "A steady daily deficit of around 500 calories is a sustainable pace for losing weight.",
                    "Log your food for two weeks to find your baseline, then adjust by 200 to 300 calories.",
                    "Pair a calorie deficit with strength training so the weight you lose is fat rather than muscle.",
                ],
            ),
            (
                CoachTopic::Motivation,
                vec![
                    "Showing up is most of the work. Even a short session keeps the habit alive.",
                    "Tired? Commit to ten minutes. Energy often shows up once you start moving.",
                    "Look back at where you started. Progress is not linear, but it adds up.",
                ],
            ),
            (
                CoachTopic::General,
                vec![
                    "Ask me about workouts, nutrition, weight goals, or if you need a motivation boost.",
                    "I can help with training plans, meal ideas and staying on track. What would you like to work on?",
                ],
            ),
        ]
        .into_iter()
        .map(|(topic, lines)| (topic, lines.into_iter().map(str::to_string).collect()))
        .collect();

        Self::new(foods, replies)
    }
}

impl SuggestionProviderPort for CannedSuggestionProvider {
    fn classify_food(&self, _image: Option<&[u8]>) -> NutritionEstimate {
        self.foods
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(|| estimate("Unknown dish", 0.0, 0.0, 0.0, 0.0, 0.0))
    }

    fn respond(&self, topic: CoachTopic, _message: &str) -> String {
        self.replies
            .get(&topic)
            .or_else(|| self.replies.get(&CoachTopic::General))
            .and_then(|lines| lines.choose(&mut rand::rng()))
            .cloned()
            .unwrap_or_else(|| "I'm here to help with your fitness journey.".to_string())
    }
}
