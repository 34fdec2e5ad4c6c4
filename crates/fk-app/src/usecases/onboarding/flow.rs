use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, Instrument};

use fk_core::{
    OnboardingAction, OnboardingEvent, OnboardingForm, OnboardingState, OnboardingStateMachine,
    SignupPrefill,
};

use super::complete::{CompleteOnboarding, OnboardingCompletion};

/// Drives the onboarding state machine and executes its actions.
pub struct OnboardingFlow {
    state: Mutex<OnboardingState>,
    initial_form: OnboardingForm,
    complete: Arc<CompleteOnboarding>,
}

impl OnboardingFlow {
    pub fn new(complete: Arc<CompleteOnboarding>, prefill: Option<&SignupPrefill>) -> Self {
        Self {
            state: Mutex::new(OnboardingState::start()),
            initial_form: OnboardingForm::with_prefill(prefill),
            complete,
        }
    }

    /// Form to render first, with the name taken from the sign-up prefill.
    pub fn initial_form(&self) -> OnboardingForm {
        self.initial_form.clone()
    }

    pub async fn state(&self) -> OnboardingState {
        self.state.lock().await.clone()
    }

    /// Apply one event. Returns the new state and, once the profile was
    /// accepted, the completion result.
    pub async fn dispatch(
        &self,
        event: OnboardingEvent,
    ) -> (OnboardingState, Option<OnboardingCompletion>) {
        // Held across action execution so submits are serialized.
        let mut guard = self.state.lock().await;

        let span = info_span!("usecase.onboarding_flow.dispatch");
        async {
            let from = guard.clone();
            let (next, actions) = OnboardingStateMachine::transition(from.clone(), event);
            info!(from = ?from, to = ?next, "onboarding state transition");

            let mut completion = None;
            for action in actions {
                debug!(?action, "onboarding executing action");
                match action {
                    OnboardingAction::PersistProfile { profile } => {
                        completion = Some(self.complete.execute(profile).await);
                    }
                }
            }

            *guard = next.clone();
            (next, completion)
        }
        .instrument(span)
        .await
    }
}
