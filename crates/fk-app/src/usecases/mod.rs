//! Use cases.
//!
//! `session` decides which screen to show and owns the sign-in/up/out
//! flows. `onboarding` drives the profile form. `tracking` backs the API.

pub mod onboarding;
pub mod session;
pub mod tracking;

pub use onboarding::{CompleteOnboarding, OnboardingCompletion, OnboardingFlow};
pub use session::{
    AuthActionHandler, AuthError, ReconcileContext, SessionReconciler, SignIn, SignOut, SignUp,
};
