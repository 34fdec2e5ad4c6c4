use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use fk_core::ports::{AuthStateStorePort, SessionProviderPort};
use fk_core::{ScreenOverride, ScreenState};

use super::reconciler::SessionReconciler;

/// Sign out and recompute the screen.
pub struct SignOut {
    auth_state: Arc<dyn AuthStateStorePort>,
    session_provider: Arc<dyn SessionProviderPort>,
    reconciler: Arc<SessionReconciler>,
}

impl SignOut {
    pub fn new(
        auth_state: Arc<dyn AuthStateStorePort>,
        session_provider: Arc<dyn SessionProviderPort>,
        reconciler: Arc<SessionReconciler>,
    ) -> Self {
        Self {
            auth_state,
            session_provider,
            reconciler,
        }
    }

    pub async fn execute(&self) -> ScreenState {
        let span = info_span!("usecase.sign_out.execute");
        async {
            self.reconciler.invalidate_passes().await;
            let flags = self.auth_state.load();
            if flags.has_demo_session() {
                info!("signing out demo account");
            } else if let Err(err) = self.session_provider.sign_out().await {
                warn!(error = %err, "provider sign-out failed, clearing local state anyway");
            }

            self.auth_state.clear_all();
            self.reconciler.reconcile(&ScreenOverride::none()).await
        }
        .instrument(span)
        .await
    }
}
