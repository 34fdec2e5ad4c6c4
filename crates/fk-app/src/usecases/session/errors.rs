use thiserror::Error;

use fk_core::auth::CredentialsError;
use fk_core::ports::{HashError, SessionError};

/// Failures surfaced to the auth screen. Display strings are user-facing.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error("No demo account found. Please create a demo account first.")]
    NoDemoAccount,

    #[error("Invalid email or password for demo account")]
    InvalidDemoCredentials,

    #[error("{}", .0.user_message())]
    Provider(#[from] SessionError),

    #[error("Account creation failed. Please try again.")]
    Hashing(#[from] HashError),
}
