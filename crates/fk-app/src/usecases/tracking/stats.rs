use std::sync::Arc;

use fk_core::ports::{ActivityPort, ClockPort, KvStorePort};
use fk_core::tracking::{keys, LogKind};
use fk_core::{AuthUser, DailyStats, FoodLog, WorkoutLog};

use super::load_records;

/// Today's dashboard totals (UTC day).
pub struct DailyStatsQuery {
    kv: Arc<dyn KvStorePort>,
    activity: Arc<dyn ActivityPort>,
    clock: Arc<dyn ClockPort>,
}

impl DailyStatsQuery {
    pub fn new(
        kv: Arc<dyn KvStorePort>,
        activity: Arc<dyn ActivityPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            kv,
            activity,
            clock,
        }
    }

    pub async fn execute(&self, user: &AuthUser) -> anyhow::Result<DailyStats> {
        let today = self.clock.now_utc().date_naive();
        let food: Vec<FoodLog> =
            load_records(self.kv.as_ref(), &keys::log_prefix(&user.id, LogKind::Food)).await?;
        let workouts: Vec<WorkoutLog> =
            load_records(self.kv.as_ref(), &keys::log_prefix(&user.id, LogKind::Workout)).await?;

        Ok(DailyStats::for_day(
            today,
            &food,
            &workouts,
            self.activity.steps_today(&user.id),
        ))
    }
}
