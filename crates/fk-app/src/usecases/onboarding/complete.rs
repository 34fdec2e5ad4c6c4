use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};

use fk_core::ports::{AuthStateStorePort, ClockPort, ProfileServicePort, SessionProviderPort};
use fk_core::{Profile, ScreenState};

use crate::deps::ClientDeps;
use crate::usecases::session::SessionReconciler;

/// Upper bound on the best-effort profile upload.
pub const REMOTE_SYNC_TIMEOUT: Duration = Duration::from_secs(5);

const STORAGE_WARNING: &str =
    "Your profile could not be saved on this device. It will be lost when the app restarts.";

/// Result of finishing onboarding.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingCompletion {
    pub screen: ScreenState,
    pub profile: Profile,
    /// The profile service accepted the profile.
    pub synced_remote: bool,
    /// Shown to the user when local storage did not persist.
    pub warning: Option<String>,
}

/// Persist a completed profile and move to the app.
///
/// The local write always runs first and the screen always becomes
/// [`ScreenState::App`]. The remote create is attempted only with a remote
/// session, bounded by [`REMOTE_SYNC_TIMEOUT`], and its failure is logged.
pub struct CompleteOnboarding {
    auth_state: Arc<dyn AuthStateStorePort>,
    session_provider: Arc<dyn SessionProviderPort>,
    profile_service: Arc<dyn ProfileServicePort>,
    clock: Arc<dyn ClockPort>,
    reconciler: Arc<SessionReconciler>,
}

impl CompleteOnboarding {
    pub fn new(
        auth_state: Arc<dyn AuthStateStorePort>,
        session_provider: Arc<dyn SessionProviderPort>,
        profile_service: Arc<dyn ProfileServicePort>,
        clock: Arc<dyn ClockPort>,
        reconciler: Arc<SessionReconciler>,
    ) -> Self {
        Self {
            auth_state,
            session_provider,
            profile_service,
            clock,
            reconciler,
        }
    }

    pub fn from_deps(deps: &ClientDeps, reconciler: Arc<SessionReconciler>) -> Self {
        Self::new(
            deps.auth_state.clone(),
            deps.session_provider.clone(),
            deps.profile_service.clone(),
            deps.clock.clone(),
            reconciler,
        )
    }

    pub async fn execute(&self, mut profile: Profile) -> OnboardingCompletion {
        let span = info_span!("usecase.complete_onboarding.execute");
        async {
            let flags = self.auth_state.load();
            profile.completed = true;
            profile.timestamp = Some(self.clock.now_utc());
            if profile.email.is_none() {
                profile.email = flags
                    .signup_prefill
                    .as_ref()
                    .and_then(|p| p.email())
                    .map(str::to_string);
            }

            self.reconciler.invalidate_passes().await;
            let outcome = self
                .auth_state
                .set_cached_profile(&profile)
                .worst(self.auth_state.set_onboarding_completed(true));
            let warning = if outcome.is_degraded() {
                warn!(?outcome, "onboarding result not persisted");
                Some(STORAGE_WARNING.to_string())
            } else {
                None
            };

            let synced_remote = if flags.has_demo_session() {
                false
            } else {
                self.sync_remote(&profile).await
            };

            self.auth_state.clear_signup_prefill();
            let screen = self.reconciler.show(ScreenState::App).await;
            info!(synced_remote, degraded = outcome.is_degraded(), "onboarding completed");

            OnboardingCompletion {
                screen,
                profile,
                synced_remote,
                warning,
            }
        }
        .instrument(span)
        .await
    }

    async fn sync_remote(&self, profile: &Profile) -> bool {
        let session = match self.session_provider.get_session().await {
            Ok(Some(session)) => session,
            Ok(None) => return false,
            Err(err) => {
                warn!(error = %err, "no session for profile upload");
                return false;
            }
        };

        match tokio::time::timeout(
            REMOTE_SYNC_TIMEOUT,
            self.profile_service.create_profile(&session, profile),
        )
        .await
        {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                warn!(error = %err, "profile upload failed, kept locally");
                false
            }
            Err(_) => {
                warn!("profile upload timed out, kept locally");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fk_core::ports::{ProfileServiceError, ScreenEventPort, SessionError, WriteOutcome};
    use fk_core::profile::{ActivityLevel, DietPreference, Gender, Goal};
    use fk_core::{
        AuthUser, Credentials, DemoSession, DemoUser, LocalAuthFlags, ProfileStatus, Session,
        SignupPrefill,
    };
    use std::sync::Mutex;

    use crate::usecases::session::ReconcileContext;

    /// Auth state whose every write fails to persist.
    #[derive(Default)]
    struct VolatileAuthState {
        flags: Mutex<LocalAuthFlags>,
    }

    impl AuthStateStorePort for VolatileAuthState {
        fn load(&self) -> LocalAuthFlags {
            self.flags.lock().unwrap().clone()
        }
        fn set_onboarding_completed(&self, completed: bool) -> WriteOutcome {
            self.flags.lock().unwrap().onboarding_completed = Some(completed);
            WriteOutcome::MemoryOnly
        }
        fn set_cached_profile(&self, profile: &Profile) -> WriteOutcome {
            self.flags.lock().unwrap().cached_profile = Some(profile.clone());
            WriteOutcome::MemoryOnly
        }
        fn set_signup_prefill(&self, prefill: &SignupPrefill) -> WriteOutcome {
            self.flags.lock().unwrap().signup_prefill = Some(prefill.clone());
            WriteOutcome::MemoryOnly
        }
        fn clear_signup_prefill(&self) {
            self.flags.lock().unwrap().signup_prefill = None;
        }
        fn set_demo_account(&self, user: &DemoUser, session: &DemoSession) -> WriteOutcome {
            let mut flags = self.flags.lock().unwrap();
            flags.demo_user = Some(user.clone());
            flags.demo_session = Some(session.clone());
            WriteOutcome::MemoryOnly
        }
        fn clear_all(&self) {
            *self.flags.lock().unwrap() = LocalAuthFlags::default();
        }
    }

    struct SignedIn;

    #[async_trait]
    impl SessionProviderPort for SignedIn {
        async fn get_session(&self) -> Result<Option<Session>, SessionError> {
            Ok(Some(Session {
                access_token: "token".to_string(),
                user: AuthUser {
                    id: "user-1".to_string(),
                    email: None,
                    name: None,
                },
            }))
        }
        async fn sign_in_with_password(&self, _: &Credentials) -> Result<Session, SessionError> {
            Err(SessionError::Transport("unused".to_string()))
        }
        async fn sign_up(&self, _: &Credentials, _: &str) -> Result<Option<Session>, SessionError> {
            Ok(None)
        }
        async fn sign_out(&self) -> Result<(), SessionError> {
            Ok(())
        }
    }

    /// Never answers a create.
    struct HangingProfiles;

    #[async_trait]
    impl ProfileServicePort for HangingProfiles {
        async fn fetch_status(&self, _: &Session) -> Result<ProfileStatus, ProfileServiceError> {
            Err(ProfileServiceError::Status(503))
        }
        async fn create_profile(&self, _: &Session, _: &Profile) -> Result<(), ProfileServiceError> {
            std::future::pending().await
        }
    }

    struct NoEvents;

    #[async_trait]
    impl ScreenEventPort for NoEvents {
        async fn emit_screen_changed(&self, _: ScreenState, _: u64) {}
    }

    struct Clock;

    impl ClockPort for Clock {
        fn now_ms(&self) -> i64 {
            1_760_000_000_000
        }
    }

    fn profile() -> Profile {
        Profile {
            user_id: None,
            email: None,
            name: "Sam".to_string(),
            gender: Gender::Female,
            age: 25,
            height: 175,
            weight: 70.0,
            goal: Goal::Maintain,
            activity_level: ActivityLevel::Moderate,
            diet_preference: DietPreference::None,
            completed: false,
            timestamp: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_remote_and_failed_storage_still_reach_app() {
        let auth_state = Arc::new(VolatileAuthState::default());
        auth_state.set_signup_prefill(&SignupPrefill::from_email("sam@fitkro.app"));
        let session_provider: Arc<dyn SessionProviderPort> = Arc::new(SignedIn);
        let profile_service: Arc<dyn ProfileServicePort> = Arc::new(HangingProfiles);
        let reconciler = Arc::new(SessionReconciler::new(
            ReconcileContext::new().arc(),
            auth_state.clone(),
            session_provider.clone(),
            profile_service.clone(),
            Arc::new(NoEvents),
        ));
        let complete = CompleteOnboarding::new(
            auth_state.clone(),
            session_provider,
            profile_service,
            Arc::new(Clock),
            reconciler,
        );

        let completion = complete.execute(profile()).await;

        assert_eq!(completion.screen, ScreenState::App);
        assert!(!completion.synced_remote);
        assert_eq!(completion.warning.as_deref(), Some(STORAGE_WARNING));
        assert!(completion.profile.completed);
        assert_eq!(completion.profile.email.as_deref(), Some("sam@fitkro.app"));

        let flags = auth_state.load();
        assert_eq!(flags.onboarding_completed, Some(true));
        assert!(flags.signup_prefill.is_none());
    }
}
