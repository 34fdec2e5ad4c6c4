//! Tracking use cases behind the API routes.
//!
//! Records are JSON documents in the KV store under the user-scoped keys of
//! [`fk_core::tracking::keys`]. Log ids are the current epoch milliseconds.

mod coach;
mod food;
mod profile;
mod stats;
mod weight;
mod workouts;

pub use coach::{CoachChat, CoachReply};
pub use food::{FoodRecords, NewFoodLog};
pub use profile::ProfileRecords;
pub use stats::DailyStatsQuery;
pub use weight::{NewWeightLog, WeightRecords};
pub use workouts::{NewWorkoutLog, WorkoutRecords};

use fk_core::ports::KvStorePort;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Load and decode every record under `prefix`. Malformed records are
/// skipped.
async fn load_records<T: DeserializeOwned>(
    kv: &dyn KvStorePort,
    prefix: &str,
) -> anyhow::Result<Vec<T>> {
    let values = kv.get_by_prefix(prefix).await?;
    let mut records = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(err) => warn!(prefix, error = %err, "skipping malformed record"),
        }
    }
    Ok(records)
}
