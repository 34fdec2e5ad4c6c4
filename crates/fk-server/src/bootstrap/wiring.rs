//! # Dependency wiring
//!
//! The only place that depends on `fk-infra` and `fk-app` together. It
//! builds adapters from [`AppConfig`] and hands them over as port objects.
//! No decisions are made here.

use std::path::Path;
use std::sync::Arc;

use fk_app::usecases::{
    AuthActionHandler, CompleteOnboarding, ReconcileContext, SessionReconciler, SignIn, SignOut,
    SignUp,
};
use fk_app::{ApiDeps, ClientDeps};
use fk_core::config::AppConfig;
use fk_core::ports::{ScreenEventPort, WorkoutCatalogPort};
use fk_infra::db::{init_db_pool, DbPool, DieselKvStore};
use fk_infra::{
    Argon2CredentialHasher, CannedSuggestionProvider, FileFlagStore, GoTrueClient,
    HttpProfileService, InMemoryFlagStore, JsonWorkoutCatalog, LayeredAuthStateStore,
    SimulatedActivity, SystemClock,
};
use tracing::{info, warn};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("Auth client initialization failed: {0}")]
    AuthClientInit(String),

    #[error("Profile client initialization failed: {0}")]
    ProfileClientInit(String),

    #[error("Workout catalog could not be loaded: {0}")]
    CatalogInit(String),
}

fn create_db_pool(db_path: &Path) -> WiringResult<DbPool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            WiringError::DatabaseInit(format!("Failed to create DB directory: {e}"))
        })?;
    }

    let db_url = db_path
        .to_str()
        .ok_or_else(|| WiringError::DatabaseInit("Invalid database path".to_string()))?;

    init_db_pool(db_url).map_err(|e| WiringError::DatabaseInit(e.to_string()))
}

fn create_catalog(path: &Path) -> WiringResult<Arc<dyn WorkoutCatalogPort>> {
    let catalog =
        JsonWorkoutCatalog::load(path).map_err(|e| WiringError::CatalogInit(e.to_string()))?;
    Ok(Arc::new(catalog))
}

/// Ports for the API server.
pub fn wire_api(config: &AppConfig) -> WiringResult<ApiDeps> {
    let clock = Arc::new(SystemClock);
    let db_pool = create_db_pool(&config.database_path)?;
    info!(path = %config.database_path.display(), "kv store ready");

    // The server never signs in, so the session cache stays in memory.
    let token_verifier = GoTrueClient::new(
        config.auth_url.as_str(),
        config.auth_anon_key.as_str(),
        Arc::new(InMemoryFlagStore::new()),
    )
    .map_err(|e| WiringError::AuthClientInit(e.to_string()))?;
    if config.auth_url.is_empty() {
        warn!("auth url not configured, every bearer token will be rejected");
    }

    Ok(ApiDeps {
        kv: Arc::new(DieselKvStore::new(db_pool, clock.clone())),
        token_verifier: Arc::new(token_verifier),
        workout_catalog: create_catalog(&config.workout_catalog_path)?,
        suggestions: Arc::new(CannedSuggestionProvider::builtin()),
        activity: Arc::new(SimulatedActivity),
        clock,
    })
}

/// Ports for the client flows. Screen changes go to `screen_events`.
pub fn wire_client_deps(
    config: &AppConfig,
    screen_events: Arc<dyn ScreenEventPort>,
) -> WiringResult<ClientDeps> {
    let flags = Arc::new(FileFlagStore::new(config.flags_path.clone()));
    // Process-scoped fallback for writes the flag file rejects.
    let secondary = Arc::new(InMemoryFlagStore::new());

    let session_provider = GoTrueClient::new(
        config.auth_url.as_str(),
        config.auth_anon_key.as_str(),
        flags.clone(),
    )
    .map_err(|e| WiringError::AuthClientInit(e.to_string()))?;
    let profile_service = HttpProfileService::new(config.profile_base_url.as_str())
        .map_err(|e| WiringError::ProfileClientInit(e.to_string()))?;

    Ok(ClientDeps {
        auth_state: Arc::new(LayeredAuthStateStore::new(flags, secondary)),
        session_provider: Arc::new(session_provider),
        profile_service: Arc::new(profile_service),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        screen_events,
        clock: Arc::new(SystemClock),
    })
}

/// Client use cases sharing one reconciler.
pub struct ClientHandles {
    pub deps: ClientDeps,
    pub reconciler: Arc<SessionReconciler>,
    pub auth_actions: AuthActionHandler,
    pub sign_in: SignIn,
    pub sign_up: SignUp,
    pub sign_out: SignOut,
    pub complete_onboarding: Arc<CompleteOnboarding>,
}

pub fn wire_client(
    config: &AppConfig,
    screen_events: Arc<dyn ScreenEventPort>,
) -> WiringResult<ClientHandles> {
    let deps = wire_client_deps(config, screen_events)?;
    let reconciler = Arc::new(SessionReconciler::from_deps(ReconcileContext::new().arc(), &deps));

    Ok(ClientHandles {
        auth_actions: AuthActionHandler::new(deps.auth_state.clone(), reconciler.clone()),
        sign_in: SignIn::from_deps(&deps),
        sign_up: SignUp::from_deps(&deps),
        sign_out: SignOut::new(
            deps.auth_state.clone(),
            deps.session_provider.clone(),
            reconciler.clone(),
        ),
        complete_onboarding: Arc::new(CompleteOnboarding::from_deps(&deps, reconciler.clone())),
        reconciler,
        deps,
    })
}
