use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, info_span, Instrument};

use fk_core::ports::{ClockPort, KvStorePort, WorkoutCatalogPort};
use fk_core::tracking::{keys, LogKind};
use fk_core::{AuthUser, Workout, WorkoutLog};

use super::load_records;

/// Body of a workout log request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutLog {
    pub workout_id: String,
    pub workout_name: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

pub struct WorkoutRecords {
    kv: Arc<dyn KvStorePort>,
    catalog: Arc<dyn WorkoutCatalogPort>,
    clock: Arc<dyn ClockPort>,
}

impl WorkoutRecords {
    pub fn new(
        kv: Arc<dyn KvStorePort>,
        catalog: Arc<dyn WorkoutCatalogPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self { kv, catalog, clock }
    }

    /// Catalog entries, filtered by category unless `None` or `"All"`.
    pub fn list(&self, category: Option<&str>) -> anyhow::Result<Vec<Workout>> {
        Ok(self
            .catalog
            .list()?
            .into_iter()
            .filter(|w| w.matches_category(category))
            .collect())
    }

    pub async fn log(&self, user: &AuthUser, input: NewWorkoutLog) -> anyhow::Result<WorkoutLog> {
        let span = info_span!("usecase.workouts.log", user_id = %user.id);
        async {
            let log_id = self.clock.now_ms().to_string();
            let log = WorkoutLog {
                user_id: user.id.clone(),
                workout_id: input.workout_id,
                workout_name: input.workout_name,
                duration: input.duration,
                calories: input.calories,
                completed_at: input.completed_at.unwrap_or_else(|| self.clock.now_utc()),
                log_id,
            };

            let key = keys::log(&user.id, LogKind::Workout, &log.log_id);
            self.kv.set(&key, &serde_json::to_value(&log)?).await?;
            info!(workout_id = %log.workout_id, "workout logged");
            Ok(log)
        }
        .instrument(span)
        .await
    }

    /// Newest first.
    pub async fn history(&self, user: &AuthUser) -> anyhow::Result<Vec<WorkoutLog>> {
        let prefix = keys::log_prefix(&user.id, LogKind::Workout);
        let mut logs: Vec<WorkoutLog> = load_records(self.kv.as_ref(), &prefix).await?;
        logs.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(logs)
    }
}
