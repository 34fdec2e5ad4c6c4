use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use fk_core::ports::{AuthStateStorePort, CredentialHasherPort, SessionProviderPort};
use fk_core::{AuthOutcome, Credentials};

use super::errors::AuthError;
use crate::deps::ClientDeps;

/// Sign in with email and password.
///
/// Demo addresses are checked against the locally stored demo account and
/// never reach the session provider.
pub struct SignIn {
    auth_state: Arc<dyn AuthStateStorePort>,
    session_provider: Arc<dyn SessionProviderPort>,
    hasher: Arc<dyn CredentialHasherPort>,
}

impl SignIn {
    pub fn new(
        auth_state: Arc<dyn AuthStateStorePort>,
        session_provider: Arc<dyn SessionProviderPort>,
        hasher: Arc<dyn CredentialHasherPort>,
    ) -> Self {
        Self {
            auth_state,
            session_provider,
            hasher,
        }
    }

    pub fn from_deps(deps: &ClientDeps) -> Self {
        Self::new(
            deps.auth_state.clone(),
            deps.session_provider.clone(),
            deps.hasher.clone(),
        )
    }

    pub async fn execute(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        let span = info_span!("usecase.sign_in.execute", demo = credentials.is_demo());
        async {
            if credentials.is_demo() {
                self.sign_in_demo(credentials)?;
            } else {
                self.session_provider
                    .sign_in_with_password(credentials)
                    .await
                    .inspect_err(|err| warn!(error = %err, "provider sign-in failed"))?;
            }
            info!("sign-in succeeded");
            Ok(AuthOutcome::SignIn)
        }
        .instrument(span)
        .await
    }

    fn sign_in_demo(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let flags = self.auth_state.load();
        let (Some(user), Some(_session)) = (flags.demo_user, flags.demo_session) else {
            warn!("demo sign-in without a stored demo account");
            return Err(AuthError::NoDemoAccount);
        };

        if user.email != credentials.email()
            || !self.hasher.verify(credentials.password(), &user.password_hash)
        {
            warn!("demo credentials do not match");
            return Err(AuthError::InvalidDemoCredentials);
        }
        Ok(())
    }
}
