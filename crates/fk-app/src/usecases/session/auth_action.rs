use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use fk_core::auth::ScreenPolicy;
use fk_core::ports::AuthStateStorePort;
use fk_core::{AuthOutcome, ScreenOverride, ScreenState, SignupPrefill};

use super::reconciler::SessionReconciler;

/// Moves the client to the right screen after a successful sign-in or sign-up.
pub struct AuthActionHandler {
    auth_state: Arc<dyn AuthStateStorePort>,
    reconciler: Arc<SessionReconciler>,
}

impl AuthActionHandler {
    pub fn new(auth_state: Arc<dyn AuthStateStorePort>, reconciler: Arc<SessionReconciler>) -> Self {
        Self {
            auth_state,
            reconciler,
        }
    }

    pub async fn handle_auth_success(&self, outcome: AuthOutcome) -> ScreenState {
        let span = info_span!("usecase.auth_action.handle_auth_success", outcome = outcome.kind());
        async {
            match outcome {
                AuthOutcome::SignUp { prefill, simulated } => {
                    self.after_sign_up(prefill, simulated).await
                }
                AuthOutcome::SignIn => {
                    let flags = self.auth_state.load();
                    match ScreenPolicy::for_demo(&flags) {
                        Some(screen) => self.reconciler.show(screen).await,
                        None => self.reconciler.reconcile_remote().await,
                    }
                }
                AuthOutcome::Unknown => self.reconciler.reconcile(&ScreenOverride::none()).await,
            }
        }
        .instrument(span)
        .await
    }

    /// Sign-up goes straight to onboarding without a reconciliation pass, as
    /// long as an email is known for the prefill.
    async fn after_sign_up(&self, prefill: Option<SignupPrefill>, simulated: bool) -> ScreenState {
        let prefill = prefill
            .filter(SignupPrefill::has_email)
            .or_else(|| self.auth_state.load().signup_prefill.filter(SignupPrefill::has_email));

        let Some(prefill) = prefill else {
            warn!(simulated, "sign-up finished without a prefill email, back to auth");
            return self.reconciler.show(ScreenState::Auth).await;
        };

        let outcome = self.auth_state.set_signup_prefill(&prefill);
        if outcome.is_degraded() {
            warn!(?outcome, "signup prefill not persisted");
        }
        info!(simulated, "sign-up complete, starting onboarding");
        self.reconciler.show(ScreenState::Onboarding).await
    }
}
