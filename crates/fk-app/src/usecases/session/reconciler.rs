//! Session reconciler.
//!
//! Decides which of the four top-level screens to show from the session
//! provider, the profile service and the local flags.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use fk_core::auth::{ProfileLookup, ScreenDecision, ScreenPolicy};
use fk_core::ports::{AuthStateStorePort, ProfileServicePort, ScreenEventPort, SessionProviderPort};
use fk_core::{ScreenOverride, ScreenState};

use super::context::ReconcileContext;
use crate::deps::ClientDeps;

pub struct SessionReconciler {
    context: Arc<ReconcileContext>,
    auth_state: Arc<dyn AuthStateStorePort>,
    session_provider: Arc<dyn SessionProviderPort>,
    profile_service: Arc<dyn ProfileServicePort>,
    screen_events: Arc<dyn ScreenEventPort>,
}

impl SessionReconciler {
    pub fn new(
        context: Arc<ReconcileContext>,
        auth_state: Arc<dyn AuthStateStorePort>,
        session_provider: Arc<dyn SessionProviderPort>,
        profile_service: Arc<dyn ProfileServicePort>,
        screen_events: Arc<dyn ScreenEventPort>,
    ) -> Self {
        Self {
            context,
            auth_state,
            session_provider,
            profile_service,
            screen_events,
        }
    }

    pub fn from_deps(context: Arc<ReconcileContext>, deps: &ClientDeps) -> Self {
        Self::new(
            context,
            deps.auth_state.clone(),
            deps.session_provider.clone(),
            deps.profile_service.clone(),
            deps.screen_events.clone(),
        )
    }

    /// Currently applied screen.
    pub async fn screen(&self) -> ScreenState {
        self.context.screen().await
    }

    /// Compute the screen for the current facts without applying it.
    ///
    /// Nothing is written. The `onboarding_completed` write-through carried
    /// by the decision is committed only when a pass applies it.
    pub async fn resolve_screen_state(&self, overrides: &ScreenOverride) -> ScreenDecision {
        if let Some(forced) = overrides.forced() {
            info!(screen = %forced, "developer override selected screen");
            return ScreenDecision::show(forced);
        }

        let flags = self.auth_state.load();
        if let Some(screen) = ScreenPolicy::for_demo(&flags) {
            debug!(screen = %screen, "demo session present, remote provider skipped");
            return ScreenDecision::show(screen);
        }

        self.resolve_remote().await
    }

    /// Provider and profile steps only. Used after a non-demo sign-in.
    pub async fn resolve_remote(&self) -> ScreenDecision {
        let session = match self.session_provider.get_session().await {
            Ok(Some(session)) => session,
            Ok(None) => {
                debug!("no session, showing auth");
                return ScreenDecision::show(ScreenState::Auth);
            }
            Err(err) => {
                warn!(error = %err, "session provider failed, showing auth");
                return ScreenDecision::show(ScreenState::Auth);
            }
        };

        let lookup = match self.profile_service.fetch_status(&session).await {
            Ok(status) => ProfileLookup::Fetched(status),
            Err(err) => {
                warn!(error = %err, user_id = %session.user.id, "profile lookup failed, using cached flag");
                ProfileLookup::Unavailable
            }
        };

        let cached = self.auth_state.load().onboarding_completed;
        ScreenPolicy::for_profile(lookup, cached)
    }

    /// Run a full pass and apply it unless a newer pass started meanwhile.
    pub async fn reconcile(&self, overrides: &ScreenOverride) -> ScreenState {
        let span = info_span!("usecase.session_reconciler.reconcile");
        self.run_pass(self.resolve_screen_state(overrides))
            .instrument(span)
            .await
    }

    /// Run the remote-only pass under a fresh generation.
    pub async fn reconcile_remote(&self) -> ScreenState {
        let span = info_span!("usecase.session_reconciler.reconcile_remote");
        self.run_pass(self.resolve_remote()).instrument(span).await
    }

    /// Apply a known screen directly. Still takes a generation so that any
    /// pass already in flight cannot overwrite it.
    pub async fn show(&self, screen: ScreenState) -> ScreenState {
        self.run_pass(async { ScreenDecision::show(screen) }).await
    }

    /// Make every in-flight pass stale without applying anything. Call before
    /// rewriting the flags a pass may write through.
    pub async fn invalidate_passes(&self) {
        let generation = self.context.invalidate().await;
        debug!(generation, "in-flight passes invalidated");
    }

    async fn run_pass(&self, resolve: impl Future<Output = ScreenDecision>) -> ScreenState {
        let generation = self.context.begin_pass();
        let decision = resolve.await;
        let screen = decision.screen;

        let applied = self
            .context
            .apply_with(generation, screen, || {
                self.write_through(decision.cache_onboarding_completed)
            })
            .await;

        if applied {
            info!(generation, screen = %screen, "screen applied");
            self.screen_events.emit_screen_changed(screen, generation).await;
            screen
        } else {
            let current = self.context.screen().await;
            debug!(
                generation,
                latest = self.context.latest_generation(),
                discarded = %screen,
                "stale reconciliation pass discarded"
            );
            current
        }
    }

    fn write_through(&self, onboarding_completed: Option<bool>) {
        let Some(completed) = onboarding_completed else {
            return;
        };
        let outcome = self.auth_state.set_onboarding_completed(completed);
        if outcome.is_degraded() {
            warn!(?outcome, "onboarding flag write-through not persisted");
        }
    }
}
