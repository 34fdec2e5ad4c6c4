//! Remote session provider port.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::{Credentials, Session};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The provider answered and refused the request.
    #[error("session provider rejected request: {message}")]
    Rejected { status: u16, message: String },

    #[error("session provider unreachable: {0}")]
    Transport(String),

    #[error("session provider response malformed: {0}")]
    Decode(String),

    #[error("session cache failed: {0}")]
    Storage(String),
}

impl SessionError {
    /// Short message suitable for the auth screen.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Rejected { message, .. } => {
                let lower = message.to_lowercase();
                if lower.contains("already registered") {
                    "An account with this email already exists. Please sign in instead.".to_string()
                } else if lower.contains("rate limit") || lower.contains("email limit") {
                    "Email sending limit reached. Use an address like user@demo.com to create a demo account instead.".to_string()
                } else if lower.contains("password should be") || lower.contains("weak") {
                    "Password must be at least 6 characters long.".to_string()
                } else if lower.contains("invalid email") {
                    "Please enter a valid email address.".to_string()
                } else if lower.contains("invalid login credentials") {
                    "Invalid email or password.".to_string()
                } else if lower.contains("email not confirmed") {
                    "Please confirm your email before signing in.".to_string()
                } else {
                    message.clone()
                }
            }
            SessionError::Transport(_) => {
                "Unable to reach the sign-in service. Please check your connection.".to_string()
            }
            SessionError::Decode(_) | SessionError::Storage(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

#[async_trait]
pub trait SessionProviderPort: Send + Sync {
    /// Current session, if one is cached and still accepted.
    async fn get_session(&self) -> Result<Option<Session>, SessionError>;

    async fn sign_in_with_password(&self, credentials: &Credentials)
        -> Result<Session, SessionError>;

    /// Create an account with `name` as user metadata. Providers that require
    /// email confirmation return `Ok(None)`.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        name: &str,
    ) -> Result<Option<Session>, SessionError>;

    async fn sign_out(&self) -> Result<(), SessionError>;
}
