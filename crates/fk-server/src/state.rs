use std::sync::Arc;

use fk_app::usecases::tracking::{
    CoachChat, DailyStatsQuery, FoodRecords, ProfileRecords, WeightRecords, WorkoutRecords,
};
use fk_app::ApiDeps;
use fk_core::ports::TokenVerifierPort;

/// Shared handler state: one instance of every tracking use case.
#[derive(Clone)]
pub struct ApiState {
    pub token_verifier: Arc<dyn TokenVerifierPort>,
    pub profiles: Arc<ProfileRecords>,
    pub workouts: Arc<WorkoutRecords>,
    pub food: Arc<FoodRecords>,
    pub weight: Arc<WeightRecords>,
    pub coach: Arc<CoachChat>,
    pub stats: Arc<DailyStatsQuery>,
}

impl ApiState {
    pub fn from_deps(deps: &ApiDeps) -> Self {
        Self {
            token_verifier: deps.token_verifier.clone(),
            profiles: Arc::new(ProfileRecords::new(deps.kv.clone(), deps.clock.clone())),
            workouts: Arc::new(WorkoutRecords::new(
                deps.kv.clone(),
                deps.workout_catalog.clone(),
                deps.clock.clone(),
            )),
            food: Arc::new(FoodRecords::new(
                deps.kv.clone(),
                deps.suggestions.clone(),
                deps.clock.clone(),
            )),
            weight: Arc::new(WeightRecords::new(deps.kv.clone(), deps.clock.clone())),
            coach: Arc::new(CoachChat::new(
                deps.kv.clone(),
                deps.suggestions.clone(),
                deps.clock.clone(),
            )),
            stats: Arc::new(DailyStatsQuery::new(
                deps.kv.clone(),
                deps.activity.clone(),
                deps.clock.clone(),
            )),
        }
    }
}
