use crate::auth::SignupPrefill;

/// Result of a successful sign-in or sign-up attempt, fed to the auth
/// action handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A new account was created.
    SignUp {
        prefill: Option<SignupPrefill>,
        /// Produced by a developer shortcut rather than a real form submit.
        simulated: bool,
    },
    /// An existing account signed in.
    SignIn,
    /// Outcome of an unrecognized shape.
    Unknown,
}

impl AuthOutcome {
    pub fn sign_up(prefill: SignupPrefill) -> Self {
        AuthOutcome::SignUp {
            prefill: Some(prefill),
            simulated: false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AuthOutcome::SignUp { .. } => "signup",
            AuthOutcome::SignIn => "signin",
            AuthOutcome::Unknown => "unknown",
        }
    }
}
