//! # Dependency grouping
//!
//! Plain structs that bundle the ports each entry point needs. No defaults
//! and no hidden logic: the bootstrap layer fills every field.

use std::sync::Arc;

use fk_core::ports::*;

/// Ports used by the client-side auth and onboarding flow.
#[derive(Clone)]
pub struct ClientDeps {
    pub auth_state: Arc<dyn AuthStateStorePort>,
    pub session_provider: Arc<dyn SessionProviderPort>,
    pub profile_service: Arc<dyn ProfileServicePort>,
    pub hasher: Arc<dyn CredentialHasherPort>,
    pub screen_events: Arc<dyn ScreenEventPort>,
    pub clock: Arc<dyn ClockPort>,
}

/// Ports used by the API routes.
#[derive(Clone)]
pub struct ApiDeps {
    pub kv: Arc<dyn KvStorePort>,
    pub token_verifier: Arc<dyn TokenVerifierPort>,
    pub workout_catalog: Arc<dyn WorkoutCatalogPort>,
    pub suggestions: Arc<dyn SuggestionProviderPort>,
    pub activity: Arc<dyn ActivityPort>,
    pub clock: Arc<dyn ClockPort>,
}
