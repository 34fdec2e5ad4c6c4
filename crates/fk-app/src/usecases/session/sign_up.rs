use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use fk_core::ports::{AuthStateStorePort, ClockPort, CredentialHasherPort, SessionProviderPort};
use fk_core::{AuthOutcome, Credentials, DemoSession, DemoUser, SignupPrefill};

use super::errors::AuthError;
use crate::deps::ClientDeps;

/// Create an account.
///
/// Demo addresses create a local demo account and session. Everything else
/// goes to the session provider. Both paths store the onboarding prefill.
pub struct SignUp {
    auth_state: Arc<dyn AuthStateStorePort>,
    session_provider: Arc<dyn SessionProviderPort>,
    hasher: Arc<dyn CredentialHasherPort>,
    clock: Arc<dyn ClockPort>,
}

impl SignUp {
    pub fn new(
        auth_state: Arc<dyn AuthStateStorePort>,
        session_provider: Arc<dyn SessionProviderPort>,
        hasher: Arc<dyn CredentialHasherPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            auth_state,
            session_provider,
            hasher,
            clock,
        }
    }

    pub fn from_deps(deps: &ClientDeps) -> Self {
        Self::new(
            deps.auth_state.clone(),
            deps.session_provider.clone(),
            deps.hasher.clone(),
            deps.clock.clone(),
        )
    }

    pub async fn execute(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        let span = info_span!("usecase.sign_up.execute", demo = credentials.is_demo());
        async {
            let prefill = SignupPrefill::from_email(credentials.email());

            if credentials.is_demo() {
                self.create_demo_account(credentials, &prefill)?;
            } else {
                let name = prefill.name.clone().unwrap_or_default();
                let session = self
                    .session_provider
                    .sign_up(credentials, &name)
                    .await
                    .inspect_err(|err| warn!(error = %err, "provider sign-up failed"))?;
                info!(immediate_session = session.is_some(), "provider account created");
            }

            let outcome = self.auth_state.set_signup_prefill(&prefill);
            if outcome.is_degraded() {
                warn!(?outcome, "signup prefill not persisted");
            }
            Ok(AuthOutcome::sign_up(prefill))
        }
        .instrument(span)
        .await
    }

    fn create_demo_account(
        &self,
        credentials: &Credentials,
        prefill: &SignupPrefill,
    ) -> Result<(), AuthError> {
        let user = DemoUser {
            email: credentials.email().to_string(),
            name: prefill.name.clone().unwrap_or_default(),
            password_hash: self.hasher.hash(credentials.password())?,
            created_at: self.clock.now_utc(),
            is_demo: true,
        };
        let session = DemoSession::issue(user.clone(), self.clock.now_ms());

        let outcome = self.auth_state.set_demo_account(&user, &session);
        if outcome.is_degraded() {
            warn!(?outcome, "demo account not persisted");
        }
        info!("demo account created");
        Ok(())
    }
}
