//! Screen policy.
//!
//! Pure decision rules for the session reconciler. Nothing here performs I/O;
//! the reconciler gathers the facts and asks the policy what to show.

use crate::auth::{LocalAuthFlags, ScreenState};
use crate::profile::ProfileStatus;

/// Result of asking the remote profile service for completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileLookup {
    /// The service answered with a 2xx body.
    Fetched(ProfileStatus),
    /// Non-OK response or transport failure.
    Unavailable,
}

/// Screen to show plus the write-through value for `onboarding_completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDecision {
    pub screen: ScreenState,
    pub cache_onboarding_completed: Option<bool>,
}

impl ScreenDecision {
    /// Show `screen` without touching the cached flag.
    pub fn show(screen: ScreenState) -> Self {
        Self {
            screen,
            cache_onboarding_completed: None,
        }
    }
}

pub struct ScreenPolicy;

impl ScreenPolicy {
    /// Demo accounts bypass the remote provider entirely.
    ///
    /// Returns `None` when no demo session is present.
    pub fn for_demo(flags: &LocalAuthFlags) -> Option<ScreenState> {
        if !flags.has_demo_session() {
            return None;
        }
        Some(Self::for_cached_flag(flags.onboarding_completed))
    }

    /// Fallback used when the remote profile status cannot be read.
    pub fn for_cached_flag(onboarding_completed: Option<bool>) -> ScreenState {
        if onboarding_completed == Some(true) {
            ScreenState::App
        } else {
            ScreenState::Onboarding
        }
    }

    /// Decide from a profile lookup made with a valid session.
    pub fn for_profile(lookup: ProfileLookup, cached: Option<bool>) -> ScreenDecision {
        let decision = match lookup {
            ProfileLookup::Fetched(status) if status.completed => ScreenDecision {
                screen: ScreenState::App,
                cache_onboarding_completed: Some(true),
            },
            ProfileLookup::Fetched(_) => ScreenDecision {
                screen: ScreenState::Onboarding,
                cache_onboarding_completed: Some(false),
            },
            ProfileLookup::Unavailable => ScreenDecision::show(Self::for_cached_flag(cached)),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(?lookup, ?cached, screen = %decision.screen, "screen policy decided from profile");

        decision
    }
}
