//! Typed auth-flag store over a primary and a secondary flag store.
//!
//! Writes go to the primary. When the primary fails the value is written to
//! the secondary instead. The secondary is write-only: nothing in the
//! reconciliation path reads it, so those writes are dead and only preserved
//! for parity with earlier clients. Every accepted value is also kept in an
//! in-memory mirror, which reads consult before the primary.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use fk_core::auth::{format_onboarding_flag, keys, parse_onboarding_flag};
use fk_core::ports::{AuthStateStorePort, FlagStorePort, WriteOutcome};
use fk_core::{DemoSession, DemoUser, LocalAuthFlags, Profile, SignupPrefill};

pub struct LayeredAuthStateStore {
    primary: Arc<dyn FlagStorePort>,
    secondary: Arc<dyn FlagStorePort>,
    /// `None` records a removal.
    mirror: Mutex<HashMap<String, Option<String>>>,
}

impl LayeredAuthStateStore {
    pub fn new(primary: Arc<dyn FlagStorePort>, secondary: Arc<dyn FlagStorePort>) -> Self {
        Self {
            primary,
            secondary,
            mirror: Mutex::new(HashMap::new()),
        }
    }

    fn remember(&self, key: &str, value: Option<&str>) {
        if let Ok(mut mirror) = self.mirror.lock() {
            mirror.insert(key.to_string(), value.map(str::to_string));
        }
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        if let Ok(mirror) = self.mirror.lock() {
            if let Some(value) = mirror.get(key) {
                return value.clone();
            }
        }

        match self.primary.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "flag read failed, treating as absent");
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "malformed flag value ignored");
                None
            }
        }
    }

    fn write_raw(&self, key: &str, value: &str) -> WriteOutcome {
        self.remember(key, Some(value));

        match self.primary.set(key, value) {
            Ok(()) => return WriteOutcome::Persisted,
            Err(err) => warn!(key, error = %err, "primary flag write failed"),
        }

        match self.secondary.set(key, value) {
            Ok(()) => {
                debug!(key, "flag written to secondary store");
                WriteOutcome::SecondaryOnly
            }
            Err(err) => {
                warn!(key, error = %err, "secondary flag write failed, value kept in memory");
                WriteOutcome::MemoryOnly
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> WriteOutcome {
        match serde_json::to_string(value) {
            Ok(json) => self.write_raw(key, &json),
            Err(err) => {
                warn!(key, error = %err, "flag value not serializable");
                WriteOutcome::MemoryOnly
            }
        }
    }

    fn remove(&self, key: &str) {
        self.remember(key, None);
        if let Err(err) = self.primary.remove(key) {
            warn!(key, error = %err, "primary flag remove failed");
        }
        if let Err(err) = self.secondary.remove(key) {
            debug!(key, error = %err, "secondary flag remove failed");
        }
    }
}

impl AuthStateStorePort for LayeredAuthStateStore {
    fn load(&self) -> LocalAuthFlags {
        LocalAuthFlags {
            onboarding_completed: self
                .read_raw(keys::ONBOARDING_COMPLETED)
                .map(|raw| parse_onboarding_flag(&raw)),
            cached_profile: self.read_json::<Profile>(keys::CACHED_PROFILE),
            signup_prefill: self.read_json::<SignupPrefill>(keys::SIGNUP_PREFILL),
            demo_session: self.read_json::<DemoSession>(keys::DEMO_SESSION),
            demo_user: self.read_json::<DemoUser>(keys::DEMO_USER),
        }
    }

    fn set_onboarding_completed(&self, completed: bool) -> WriteOutcome {
        self.write_raw(keys::ONBOARDING_COMPLETED, format_onboarding_flag(completed))
    }

    fn set_cached_profile(&self, profile: &Profile) -> WriteOutcome {
        self.write_json(keys::CACHED_PROFILE, profile)
    }

    fn set_signup_prefill(&self, prefill: &SignupPrefill) -> WriteOutcome {
        self.write_json(keys::SIGNUP_PREFILL, prefill)
    }

    fn clear_signup_prefill(&self) {
        self.remove(keys::SIGNUP_PREFILL);
    }

    fn set_demo_account(&self, user: &DemoUser, session: &DemoSession) -> WriteOutcome {
        self.write_json(keys::DEMO_USER, user)
            .worst(self.write_json(keys::DEMO_SESSION, session))
    }

    fn clear_all(&self) {
        for key in keys::SIGN_OUT {
            self.remove(key);
        }
    }
}
