use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, info_span, Instrument};

use fk_core::ports::{ClockPort, KvStorePort};
use fk_core::tracking::{keys, LogKind};
use fk_core::{AuthUser, WeightLog};

use super::load_records;

/// Body of a weight log request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWeightLog {
    pub weight: f64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

pub struct WeightRecords {
    kv: Arc<dyn KvStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl WeightRecords {
    pub fn new(kv: Arc<dyn KvStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { kv, clock }
    }

    /// Store a measurement and copy it onto the profile, if one exists.
    pub async fn log(&self, user: &AuthUser, input: NewWeightLog) -> anyhow::Result<WeightLog> {
        let span = info_span!("usecase.weight.log", user_id = %user.id);
        async {
            let log = WeightLog {
                user_id: user.id.clone(),
                weight: input.weight,
                date: input.date.unwrap_or_else(|| self.clock.now_utc()),
                log_id: self.clock.now_ms().to_string(),
            };
            let key = keys::log(&user.id, LogKind::Weight, &log.log_id);
            self.kv.set(&key, &serde_json::to_value(&log)?).await?;

            let profile_key = keys::profile(&user.id);
            if let Some(Value::Object(mut profile)) = self.kv.get(&profile_key).await? {
                profile.insert("weight".into(), serde_json::json!(log.weight));
                self.kv.set(&profile_key, &Value::Object(profile)).await?;
                debug!("profile weight updated");
            }

            info!("weight logged");
            Ok(log)
        }
        .instrument(span)
        .await
    }

    /// Oldest first.
    pub async fn history(&self, user: &AuthUser) -> anyhow::Result<Vec<WeightLog>> {
        let prefix = keys::log_prefix(&user.id, LogKind::Weight);
        let mut logs: Vec<WeightLog> = load_records(self.kv.as_ref(), &prefix).await?;
        logs.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(logs)
    }
}
