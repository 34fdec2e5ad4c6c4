use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, info_span, Instrument};

use fk_core::ports::{ClockPort, KvStorePort, SuggestionProviderPort};
use fk_core::tracking::{keys, LogKind};
use fk_core::{AuthUser, FoodLog, NutritionEstimate};

use super::load_records;

/// Body of a food log request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodLog {
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
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
}

pub struct FoodRecords {
    kv: Arc<dyn KvStorePort>,
    suggestions: Arc<dyn SuggestionProviderPort>,
    clock: Arc<dyn ClockPort>,
}

impl FoodRecords {
    pub fn new(
        kv: Arc<dyn KvStorePort>,
        suggestions: Arc<dyn SuggestionProviderPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            kv,
            suggestions,
            clock,
        }
    }

    pub async fn log(&self, user: &AuthUser, input: NewFoodLog) -> anyhow::Result<FoodLog> {
        let span = info_span!("usecase.food.log", user_id = %user.id);
        async {
            let log = FoodLog {
                user_id: user.id.clone(),
                food_name: input.food_name,
                calories: input.calories,
                protein: input.protein,
                carbs: input.carbs,
                fats: input.fats,
                meal_type: input.meal_type,
                logged_at: input.logged_at.unwrap_or_else(|| self.clock.now_utc()),
                log_id: self.clock.now_ms().to_string(),
            };

            let key = keys::log(&user.id, LogKind::Food, &log.log_id);
            self.kv.set(&key, &serde_json::to_value(&log)?).await?;
            info!(meal_type = %log.meal_type, "food logged");
            Ok(log)
        }
        .instrument(span)
        .await
    }

    /// Oldest first, optionally limited to one UTC day.
    pub async fn history(
        &self,
        user: &AuthUser,
        day: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<FoodLog>> {
        let prefix = keys::log_prefix(&user.id, LogKind::Food);
        let mut logs: Vec<FoodLog> = load_records(self.kv.as_ref(), &prefix).await?;
        if let Some(day) = day {
            logs.retain(|log| log.on_day(day));
        }
        logs.sort_by(|a, b| a.logged_at.cmp(&b.logged_at));
        Ok(logs)
    }

    pub fn analyze(&self, image: Option<&[u8]>) -> NutritionEstimate {
        let estimate = self.suggestions.classify_food(image);
        info!(name = %estimate.name, confidence = estimate.confidence, "food photo analyzed");
        estimate
    }
}
