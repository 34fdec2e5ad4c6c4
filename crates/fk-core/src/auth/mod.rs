//! Authentication and screen-state domain models
//!
//! This module defines the facts the session reconciler works with: the
//! remote session, the locally persisted auth flags, the outcome of an auth
//! action and the pure policy that maps them onto a [`ScreenState`].

pub mod credentials;
pub mod flags;
pub mod outcome;
pub mod policy;
pub mod screen;
pub mod session;

pub use credentials::{is_demo_email, Credentials, CredentialsError, MIN_PASSWORD_LEN};
pub use flags::{
    format_onboarding_flag, keys, parse_onboarding_flag, DemoSession, DemoUser, LocalAuthFlags,
    SignupPrefill,
};
pub use outcome::AuthOutcome;
pub use policy::{ProfileLookup, ScreenDecision, ScreenPolicy};
pub use screen::{ScreenOverride, ScreenState};
pub use session::{AuthUser, Session};
