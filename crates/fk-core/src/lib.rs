//! # fk-core
//!
//! Core domain models and business rules for Fit Kro.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod auth;
pub mod config;
pub mod ports;
pub mod profile;
pub mod tracking;

// Re-export commonly used types at the crate root
pub use auth::{
    AuthOutcome, AuthUser, Credentials, DemoSession, DemoUser, LocalAuthFlags, ScreenOverride,
    ScreenPolicy, ScreenState, Session, SignupPrefill,
};
pub use config::AppConfig;
pub use profile::{
    OnboardingAction, OnboardingError, OnboardingEvent, OnboardingForm, OnboardingState,
    OnboardingStateMachine, OnboardingStep, Profile, ProfileStatus,
};
pub use tracking::{ChatMessage, DailyStats, FoodLog, NutritionEstimate, WeightLog, Workout, WorkoutLog};
