//! Typed access to the locally persisted auth flags.
//!
//! A single injected store replaces ad-hoc reads and writes of individual
//! keys. Implementations keep an in-memory mirror so that a value accepted by
//! a write is visible to later reads even if persisting it failed.

use crate::auth::{DemoSession, DemoUser, LocalAuthFlags, SignupPrefill};
use crate::profile::Profile;

/// Where a write ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Written to the primary store.
    Persisted,
    /// Primary failed; written to the secondary store.
    SecondaryOnly,
    /// Both stores failed; only the in-memory mirror holds the value.
    MemoryOnly,
}

impl WriteOutcome {
    /// The value will not survive a restart through the primary store.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, WriteOutcome::Persisted)
    }

    /// Combine outcomes of a multi-key write, keeping the worst.
    pub fn worst(self, other: WriteOutcome) -> WriteOutcome {
        use WriteOutcome::*;
        match (self, other) {
            (MemoryOnly, _) | (_, MemoryOnly) => MemoryOnly,
            (SecondaryOnly, _) | (_, SecondaryOnly) => SecondaryOnly,
            _ => Persisted,
        }
    }
}

pub trait AuthStateStorePort: Send + Sync {
    /// Snapshot of every flag. Unreadable or malformed values read as absent.
    fn load(&self) -> LocalAuthFlags;

    fn set_onboarding_completed(&self, completed: bool) -> WriteOutcome;

    fn set_cached_profile(&self, profile: &Profile) -> WriteOutcome;

    fn set_signup_prefill(&self, prefill: &SignupPrefill) -> WriteOutcome;

    fn clear_signup_prefill(&self);

    /// Store a demo account and its session together.
    fn set_demo_account(&self, user: &DemoUser, session: &DemoSession) -> WriteOutcome;

    /// Remove every flag written on behalf of the signed-in user.
    fn clear_all(&self);
}
