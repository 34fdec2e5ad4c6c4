use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, info_span, Instrument};

use fk_core::ports::{ClockPort, KvStorePort};
use fk_core::tracking::keys;
use fk_core::AuthUser;

/// Server-side profile documents.
///
/// Profiles are stored as loose JSON so that fields the client adds later
/// survive a round trip.
pub struct ProfileRecords {
    kv: Arc<dyn KvStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl ProfileRecords {
    pub fn new(kv: Arc<dyn KvStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { kv, clock }
    }

    pub async fn get(&self, user: &AuthUser) -> anyhow::Result<Option<Value>> {
        Ok(self.kv.get(&keys::profile(&user.id)).await?)
    }

    /// Create or replace the profile from the request body.
    pub async fn create(&self, user: &AuthUser, body: Value) -> anyhow::Result<Value> {
        let span = info_span!("usecase.profile.create", user_id = %user.id);
        async {
            let mut profile = into_object(body);
            stamp_owner(&mut profile, user);
            profile.insert("completed".into(), Value::Bool(true));
            profile.insert(
                "createdAt".into(),
                Value::String(self.clock.now_utc().to_rfc3339()),
            );

            let profile = Value::Object(profile);
            self.kv.set(&keys::profile(&user.id), &profile).await?;
            info!("profile created");
            Ok(profile)
        }
        .instrument(span)
        .await
    }

    /// Merge the request body over the stored profile.
    pub async fn update(&self, user: &AuthUser, updates: Value) -> anyhow::Result<Value> {
        let span = info_span!("usecase.profile.update", user_id = %user.id);
        async {
            let key = keys::profile(&user.id);
            let mut profile = self
                .kv
                .get(&key)
                .await?
                .map(into_object)
                .unwrap_or_default();

            profile.extend(into_object(updates));
            stamp_owner(&mut profile, user);

            let profile = Value::Object(profile);
            self.kv.set(&key, &profile).await?;
            info!("profile updated");
            Ok(profile)
        }
        .instrument(span)
        .await
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn stamp_owner(profile: &mut Map<String, Value>, user: &AuthUser) {
    profile.insert("userId".into(), Value::String(user.id.clone()));
    profile.insert(
        "email".into(),
        user.email.clone().map(Value::String).unwrap_or(Value::Null),
    );
}
