//! Profile and onboarding domain models
//!
//! The profile is the record produced by the onboarding flow. The onboarding
//! state machine validates each form step and emits the profile to persist.

pub mod model;
pub mod onboarding;

pub use model::{ActivityLevel, DietPreference, Gender, Goal, Profile, ProfileStatus};
pub use onboarding::{
    OnboardingAction, OnboardingError, OnboardingEvent, OnboardingField, OnboardingForm,
    OnboardingState, OnboardingStateMachine, OnboardingStep, AGE_RANGE, HEIGHT_RANGE_CM,
    WEIGHT_RANGE_KG,
};
